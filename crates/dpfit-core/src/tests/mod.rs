mod cache;

use crate::DeviceSnapshot;

/// 1080x1920 px device at density 2.0 with no system font scaling.
pub(crate) fn snapshot_1080() -> DeviceSnapshot {
    DeviceSnapshot {
        screen_width_px: 1080,
        screen_height_px: 1920,
        status_bar_height_px: 0,
        init_density: 2.0,
        init_density_dpi: 320,
        init_scaled_density: 2.0,
        init_xdpi: 320.0,
        init_screen_width_dp: 540,
        init_screen_height_dp: 960,
        portrait: true,
    }
}
