//! The outbound boundary: computed metrics are pushed into platform-owned
//! mutable metrics objects through [`MetricsSink`], so the engine never needs
//! to know about any concrete UI framework (or its vendor-patched variants —
//! the host registers one sink per metrics object it wants updated).

use dpfit_core::{Subunit, TargetMetrics, UnitPolicy};

/// A writable view over one platform metrics object. All setters are
/// infallible by contract; application is idempotent.
pub trait MetricsSink {
    fn set_density(&mut self, density: f64, density_dpi: i32);
    fn set_scaled_density(&mut self, scaled_density: f64);
    fn set_xdpi(&mut self, xdpi: f64);
    fn set_screen_size_dp(&mut self, width_dp: i32, height_dp: i32);
}

/// Writes `metrics` into every sink, honoring the unit policy's write gates.
///
/// `xdpi` is multiplied back into the active sub-unit's native dots-per-unit
/// (`x72` for pt, `x25.4` for mm) — the inverse of the restore-time rescale —
/// and left untouched when no sub-unit is active.
pub fn apply_metrics(
    metrics: &TargetMetrics,
    policy: &UnitPolicy,
    sinks: &mut [&mut dyn MetricsSink],
) {
    for sink in sinks.iter_mut() {
        if policy.support_dp {
            sink.set_density(metrics.density, metrics.density_dpi);
        }
        if policy.support_sp {
            sink.set_scaled_density(metrics.scaled_density);
        }
        if let Some(dots_per_unit) = policy.subunit.dots_per_unit() {
            sink.set_xdpi(metrics.xdpi * dots_per_unit);
        }
        if policy.support_dp && policy.support_screen_size_dp {
            sink.set_screen_size_dp(metrics.screen_width_dp, metrics.screen_height_dp);
        }
    }
    if policy.subunit == Subunit::None
        && (policy.subunits_design_width > 0.0 || policy.subunits_design_height > 0.0)
    {
        tracing::warn!("sub-unit design size configured but no sub-unit is active; xdpi untouched");
    }
}

/// In-memory sink recording what was written. Useful as a staging buffer for
/// hosts that apply metrics in one place, and for tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedMetrics {
    pub density: Option<(f64, i32)>,
    pub scaled_density: Option<f64>,
    pub xdpi: Option<f64>,
    pub screen_size_dp: Option<(i32, i32)>,
}

impl MetricsSink for RecordedMetrics {
    fn set_density(&mut self, density: f64, density_dpi: i32) {
        self.density = Some((density, density_dpi));
    }

    fn set_scaled_density(&mut self, scaled_density: f64) {
        self.scaled_density = Some(scaled_density);
    }

    fn set_xdpi(&mut self, xdpi: f64) {
        self.xdpi = Some(xdpi);
    }

    fn set_screen_size_dp(&mut self, width_dp: i32, height_dp: i32) {
        self.screen_size_dp = Some((width_dp, height_dp));
    }
}
