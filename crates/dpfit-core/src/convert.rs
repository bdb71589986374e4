//! Unit-to-pixel helpers evaluated against a computed [`TargetMetrics`].
//!
//! These mirror the platform's dimension conversion: `dp` and `sp` go through
//! the derived densities, `pt`/`in`/`mm` through the derived `xdpi`. Results
//! round half away from zero.

use crate::metrics::TargetMetrics;
use crate::unit::{MM_PER_INCH, POINTS_PER_INCH};

pub fn dp_to_px(metrics: &TargetMetrics, value: f64) -> i32 {
    (value * metrics.density).round() as i32
}

pub fn sp_to_px(metrics: &TargetMetrics, value: f64) -> i32 {
    (value * metrics.scaled_density).round() as i32
}

pub fn pt_to_px(metrics: &TargetMetrics, value: f64) -> i32 {
    (value * metrics.xdpi / POINTS_PER_INCH).round() as i32
}

pub fn in_to_px(metrics: &TargetMetrics, value: f64) -> i32 {
    (value * metrics.xdpi).round() as i32
}

pub fn mm_to_px(metrics: &TargetMetrics, value: f64) -> i32 {
    (value * metrics.xdpi / MM_PER_INCH).round() as i32
}
