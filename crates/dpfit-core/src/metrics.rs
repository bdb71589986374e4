use serde::{Deserialize, Serialize};

use crate::snapshot::DeviceSnapshot;
use crate::unit::{MM_PER_INCH, POINTS_PER_INCH, Subunit};

/// Baseline density: 1 dp equals 1 px at 160 dpi.
pub const BASELINE_DPI: f64 = 160.0;

/// Design-time target dimension, in dp, together with the axis it measures.
///
/// A `size_in_dp <= 0` asks the engine to fall back to its globally
/// configured design size for the chosen axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSize {
    pub size_in_dp: f64,
    pub base_on_width: bool,
}

impl ReferenceSize {
    pub fn width(size_in_dp: f64) -> Self {
        Self {
            size_in_dp,
            base_on_width: true,
        }
    }

    pub fn height(size_in_dp: f64) -> Self {
        Self {
            size_in_dp,
            base_on_width: false,
        }
    }
}

/// The computed display metrics: what a platform writer applies to the live
/// density/DPI/screen-size fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetMetrics {
    pub density: f64,
    pub density_dpi: i32,
    pub scaled_density: f64,
    pub xdpi: f64,
    pub screen_width_dp: i32,
    pub screen_height_dp: i32,
}

/// Fully resolved derivation inputs. The engine resolves design-size
/// fallbacks and policy precedence before building one of these, so the
/// derivation itself never fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeriveParams {
    /// Effective design size for the scaling axis, in dp. Must be positive.
    pub size_in_dp: f64,
    /// Design size for the sub-unit (`pt`/`in`/`mm`) axis, in dp. Equals
    /// `size_in_dp` unless a sub-unit design size is configured.
    pub subunits_design_size: f64,
    pub base_on_width: bool,
    pub use_device_size: bool,
    /// App-private font scale; `<= 0` disables it and the system font scale
    /// applies.
    pub private_font_scale: f64,
    /// When set, the system font scale is ignored and `sp` tracks `dp`.
    pub exclude_font_scale: bool,
}

/// Derives the target metrics for one scaling context.
///
/// Every dimension scales by the single ratio `axis_px / size_in_dp`, so
/// layouts keep their design-time proportions regardless of the device's
/// aspect ratio. `xdpi` carries an independent ratio against the sub-unit
/// design size so `pt`/`in`/`mm` can be pinned to their own reference.
///
/// Pure and deterministic; integer outputs round half away from zero.
pub fn derive(params: &DeriveParams, snapshot: &DeviceSnapshot) -> TargetMetrics {
    let axis_px = f64::from(snapshot.axis_size_px(params.base_on_width, params.use_device_size));

    let density = axis_px / params.size_in_dp;
    let scaled_density = if params.private_font_scale > 0.0 {
        density * params.private_font_scale
    } else {
        let system_font_scale = if params.exclude_font_scale {
            1.0
        } else {
            snapshot.init_scaled_density / snapshot.init_density
        };
        density * system_font_scale
    };
    let density_dpi = (density * BASELINE_DPI).round() as i32;

    let screen_width_dp = (f64::from(snapshot.screen_width_px) / density).round() as i32;
    let screen_height_dp =
        (f64::from(snapshot.height_px(params.use_device_size)) / density).round() as i32;

    let xdpi = axis_px / params.subunits_design_size;

    TargetMetrics {
        density,
        density_dpi,
        scaled_density,
        xdpi,
        screen_width_dp,
        screen_height_dp,
    }
}

/// Metrics that undo the adaptation: the snapshot's `init_*` fields verbatim,
/// with `xdpi` rescaled into the active sub-unit's dots-per-unit baseline.
pub fn restore_defaults(snapshot: &DeviceSnapshot, subunit: Subunit) -> TargetMetrics {
    let xdpi = match subunit {
        Subunit::Pt => snapshot.init_xdpi / POINTS_PER_INCH,
        Subunit::Mm => snapshot.init_xdpi / MM_PER_INCH,
        Subunit::None | Subunit::In => snapshot.init_xdpi,
    };
    TargetMetrics {
        density: snapshot.init_density,
        density_dpi: snapshot.init_density_dpi,
        scaled_density: snapshot.init_scaled_density,
        xdpi,
        screen_width_dp: snapshot.init_screen_width_dp,
        screen_height_dp: snapshot.init_screen_height_dp,
    }
}
