use rustc_hash::FxHashMap;

use crate::metrics::TargetMetrics;

const MODE_SHIFT: u32 = 30;
const MODE_MASK: i32 = (0x3u32 << MODE_SHIFT) as i32;
const MODE_ON_WIDTH: i32 = (0x1u32 << MODE_SHIFT) as i32;
const MODE_DEVICE_SIZE: i32 = (0x2u32 << MODE_SHIFT) as i32;

/// The quantities that identify one scaling context.
///
/// Note this deliberately omits `init_density`: the cache is reset wholesale
/// whenever the snapshot's base measurements change, so entries never outlive
/// the snapshot they were computed under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerprintInputs {
    pub size_in_dp: f64,
    pub subunits_design_size: f64,
    pub axis_screen_px: i32,
    pub init_scaled_density: f64,
    pub base_on_width: bool,
    pub use_device_size: bool,
}

/// Packs a scaling context into a single `i32` key.
///
/// The low 30 bits hold the rounded numeric term
/// `(size_in_dp + subunits_design_size + axis_screen_px) * init_scaled_density`;
/// bit 30 is the axis selector and bit 31 the device-size flag. The two flag
/// bits change derivation behavior qualitatively, so contexts differing only
/// in a flag can never share an entry even when the numeric term coincides.
pub fn fingerprint(inputs: &FingerprintInputs) -> i32 {
    let numeric = (inputs.size_in_dp + inputs.subunits_design_size
        + f64::from(inputs.axis_screen_px))
        * inputs.init_scaled_density;
    let mut key = (numeric.round() as i32) & !MODE_MASK;
    if inputs.base_on_width {
        key |= MODE_ON_WIDTH;
    } else {
        key &= !MODE_ON_WIDTH;
    }
    if inputs.use_device_size {
        key |= MODE_DEVICE_SIZE;
    } else {
        key &= !MODE_DEVICE_SIZE;
    }
    key
}

/// Read-through memoization of derived metrics, keyed by [`fingerprint`].
///
/// Entries never expire individually; the owning engine clears the whole
/// table when the device snapshot changes. Entry count is bounded by the
/// number of distinct reference sizes the host actually exercises, which is
/// small in practice.
#[derive(Debug, Default)]
pub struct MetricsCache {
    entries: FxHashMap<i32, TargetMetrics>,
    computed: u64,
    hits: u64,
}

impl MetricsCache {
    pub fn get_or_compute(
        &mut self,
        key: i32,
        compute: impl FnOnce() -> TargetMetrics,
    ) -> TargetMetrics {
        if let Some(found) = self.entries.get(&key) {
            self.hits += 1;
            return *found;
        }
        let metrics = compute();
        self.computed += 1;
        self.entries.insert(key, metrics);
        metrics
    }

    /// Discards every entry. Counters are cumulative and survive the reset.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cache misses that ran the derivation.
    pub fn computed(&self) -> u64 {
        self.computed
    }

    /// Number of lookups served without recomputation.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}
