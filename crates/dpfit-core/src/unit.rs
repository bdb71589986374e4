use serde::{Deserialize, Serialize};

/// Dots per inch expressed in points (`pt`).
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters per inch, for `mm` conversions.
pub const MM_PER_INCH: f64 = 25.4;

/// Physical sub-unit family that rides on the `xdpi` channel.
///
/// Exactly one sub-unit can be active at a time; `dp`/`sp` scaling is
/// unaffected by the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subunit {
    #[default]
    None,
    Pt,
    In,
    Mm,
}

impl Subunit {
    /// Dots-per-unit factor applied when `xdpi` is written out to a platform
    /// metrics object. `None` means the sub-unit channel is inactive and
    /// `xdpi` must be left alone.
    pub fn dots_per_unit(self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Pt => Some(POINTS_PER_INCH),
            Self::In => Some(1.0),
            Self::Mm => Some(MM_PER_INCH),
        }
    }
}

/// Which derived units the engine is allowed to touch, plus the optional
/// sub-unit design sizes that decouple `pt`/`in`/`mm` scaling from the
/// `dp`/`sp` design size.
///
/// A sub-unit design size `<= 0` means "track the effective dp design size
/// for that axis".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitPolicy {
    pub support_dp: bool,
    pub support_sp: bool,
    /// Gates the `screen_width_dp`/`screen_height_dp` writes. Only meaningful
    /// when `support_dp` is also set.
    pub support_screen_size_dp: bool,
    pub subunit: Subunit,
    pub subunits_design_width: f64,
    pub subunits_design_height: f64,
}

impl Default for UnitPolicy {
    fn default() -> Self {
        Self {
            support_dp: true,
            support_sp: true,
            support_screen_size_dp: true,
            subunit: Subunit::None,
            subunits_design_width: 0.0,
            subunits_design_height: 0.0,
        }
    }
}

impl UnitPolicy {
    /// Sub-unit design size for the chosen axis, if one is configured.
    pub fn subunits_design_size(&self, base_on_width: bool) -> Option<f64> {
        let size = if base_on_width {
            self.subunits_design_width
        } else {
            self.subunits_design_height
        };
        (size > 0.0).then_some(size)
    }
}
