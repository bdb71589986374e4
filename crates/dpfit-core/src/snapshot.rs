/// Raw device measurements captured when the engine is initialized.
///
/// The `init_*` fields are the platform's untouched display metrics; they are
/// the restore target for [`cancel`](crate::Engine::cancel_adapt) and feed the
/// system font-scale ratio into every derivation. Exactly one live snapshot
/// exists per engine; configuration-change notifications mutate it in place
/// via [`MeasurementChange`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSnapshot {
    pub screen_width_px: i32,
    pub screen_height_px: i32,
    /// Height of the system-reserved chrome subtracted from the height axis
    /// when the engine is configured to exclude it.
    pub status_bar_height_px: i32,
    pub init_density: f64,
    pub init_density_dpi: i32,
    pub init_scaled_density: f64,
    pub init_xdpi: f64,
    pub init_screen_width_dp: i32,
    pub init_screen_height_dp: i32,
    pub portrait: bool,
}

impl DeviceSnapshot {
    /// Usable screen height in px. With `use_device_size` the full device
    /// height counts; otherwise the system chrome is excluded.
    pub fn height_px(&self, use_device_size: bool) -> i32 {
        if use_device_size {
            self.screen_height_px
        } else {
            self.screen_height_px - self.status_bar_height_px
        }
    }

    /// Screen size in px along the scaling axis.
    pub fn axis_size_px(&self, base_on_width: bool, use_device_size: bool) -> i32 {
        if base_on_width {
            self.screen_width_px
        } else {
            self.height_px(use_device_size)
        }
    }

    pub(crate) fn apply(&mut self, change: &MeasurementChange) {
        if let Some(scaled_density) = change.scaled_density {
            // Font-scale changes only report a positive scaled density.
            if scaled_density > 0.0 {
                self.init_scaled_density = scaled_density;
            }
        }
        if let Some((width_px, height_px)) = change.screen_size_px {
            self.screen_width_px = width_px;
            self.screen_height_px = height_px;
        }
        if let Some(portrait) = change.portrait {
            self.portrait = portrait;
        }
    }
}

/// Partial snapshot update delivered by a platform configuration-change
/// notification (rotation, resize, font-scale change). Fields left `None`
/// keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasurementChange {
    /// New font-scaled density reported by the system, if the font scale
    /// changed.
    pub scaled_density: Option<f64>,
    /// New `(width_px, height_px)` if the screen size changed.
    pub screen_size_px: Option<(i32, i32)>,
    /// New orientation, `true` for portrait.
    pub portrait: Option<bool>,
}
