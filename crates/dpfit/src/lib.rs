#![forbid(unsafe_code)]

//! `dpfit` recomputes display metrics so UI layouts authored against one
//! fixed design size render at identical relative proportions on any screen.
//!
//! The headless engine lives in [`dpfit_core`] and is re-exported here. This
//! crate adds the adaptation layer a host's platform glue drives:
//!
//! - [`sink`]: the [`MetricsSink`](sink::MetricsSink) boundary the computed
//!   metrics are written through, gated by the active [`UnitPolicy`]
//! - [`external`]: per-component overrides for components whose source you
//!   cannot change (third-party screens)
//! - [`strategy`]: resolves what a component wants (global, custom reference
//!   size, or opt-out) and runs the engine + sinks end to end

pub use dpfit_core::*;

pub mod external;
pub mod sink;
pub mod strategy;

pub use external::ExternalAdaptRegistry;
pub use sink::{MetricsSink, RecordedMetrics, apply_metrics};
pub use strategy::{AdaptListener, AdaptTarget, DefaultAdaptStrategy};
