use crate::*;

use super::snapshot_1080;

fn inputs(
    size_in_dp: f64,
    subunits_design_size: f64,
    axis_screen_px: i32,
    init_scaled_density: f64,
) -> FingerprintInputs {
    FingerprintInputs {
        size_in_dp,
        subunits_design_size,
        axis_screen_px,
        init_scaled_density,
        base_on_width: true,
        use_device_size: true,
    }
}

#[test]
fn fingerprint_numeric_term_lands_in_low_bits() {
    let key = fingerprint(&inputs(360.0, 360.0, 1080, 2.0));
    // (360 + 360 + 1080) * 2 = 3600, plus both flag bits set.
    assert_eq!(key & !((0x3u32 << 30) as i32), 3600);
    assert_ne!(key & ((0x1u32 << 30) as i32), 0);
    assert_ne!(key & ((0x2u32 << 30) as i32), 0);
}

#[test]
fn fingerprint_flags_never_collide() {
    let mut checked = 0u32;
    for size_in_dp in [320.0, 360.0, 375.0, 411.5, 640.0, 768.0, 1080.0] {
        for subunits_design_size in [320.0, 360.0, 812.25, 1080.0, 1920.0] {
            for axis_screen_px in [480, 720, 1080, 1440, 2160, 3840] {
                for init_scaled_density in [1.0, 1.5, 2.0, 2.625, 3.0, 3.5, 4.0] {
                    let base = inputs(
                        size_in_dp,
                        subunits_design_size,
                        axis_screen_px,
                        init_scaled_density,
                    );
                    let on_height = FingerprintInputs {
                        base_on_width: false,
                        ..base
                    };
                    let no_device_size = FingerprintInputs {
                        use_device_size: false,
                        ..base
                    };
                    let neither = FingerprintInputs {
                        base_on_width: false,
                        use_device_size: false,
                        ..base
                    };

                    let keys = [
                        fingerprint(&base),
                        fingerprint(&on_height),
                        fingerprint(&no_device_size),
                        fingerprint(&neither),
                    ];
                    for (i, a) in keys.iter().enumerate() {
                        for b in &keys[i + 1..] {
                            assert_ne!(a, b, "flag combinations collided for {base:?}");
                        }
                    }
                    checked += 1;
                }
            }
        }
    }
    assert!(checked >= 1000, "only {checked} combinations checked");
}

#[test]
fn fingerprint_changes_with_each_numeric_quantity() {
    let base = inputs(360.0, 360.0, 1080, 2.0);
    let key = fingerprint(&base);
    assert_ne!(
        key,
        fingerprint(&FingerprintInputs {
            size_in_dp: 361.0,
            ..base
        })
    );
    assert_ne!(
        key,
        fingerprint(&FingerprintInputs {
            subunits_design_size: 375.0,
            ..base
        })
    );
    assert_ne!(
        key,
        fingerprint(&FingerprintInputs {
            axis_screen_px: 1440,
            ..base
        })
    );
    assert_ne!(
        key,
        fingerprint(&FingerprintInputs {
            init_scaled_density: 2.5,
            ..base
        })
    );
}

#[test]
fn cache_returns_stored_value_without_recomputation() {
    let snapshot = snapshot_1080();
    let params = DeriveParams {
        size_in_dp: 360.0,
        subunits_design_size: 360.0,
        base_on_width: true,
        use_device_size: true,
        private_font_scale: 0.0,
        exclude_font_scale: false,
    };
    let key = fingerprint(&inputs(360.0, 360.0, 1080, 2.0));

    let mut cache = MetricsCache::default();
    let first = cache.get_or_compute(key, || derive(&params, &snapshot));
    let second = cache.get_or_compute(key, || panic!("must not recompute on a hit"));
    assert_eq!(first, second);
    assert_eq!(first, derive(&params, &snapshot));
    assert_eq!(cache.computed(), 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn cache_reset_clears_entries_but_keeps_counters() {
    let snapshot = snapshot_1080();
    let params = DeriveParams {
        size_in_dp: 360.0,
        subunits_design_size: 360.0,
        base_on_width: true,
        use_device_size: true,
        private_font_scale: 0.0,
        exclude_font_scale: false,
    };
    let key = fingerprint(&inputs(360.0, 360.0, 1080, 2.0));

    let mut cache = MetricsCache::default();
    cache.get_or_compute(key, || derive(&params, &snapshot));
    cache.reset();
    assert!(cache.is_empty());

    cache.get_or_compute(key, || derive(&params, &snapshot));
    assert_eq!(cache.computed(), 2);
    assert_eq!(cache.hits(), 0);
}
