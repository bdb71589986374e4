#![forbid(unsafe_code)]

//! Proportional display-metrics scaling engine (headless).
//!
//! Layouts authored against one fixed design size keep their relative
//! proportions on any physical screen: the engine recomputes density, scaled
//! density, DPI and the logical screen size from a single ratio between the
//! design size and the device's real size along one chosen axis.
//!
//! Design goals:
//! - pure, deterministic derivation ([`derive`]) with no platform coupling
//! - memoized results behind a bit-packed fingerprint ([`cache`])
//! - an explicit [`Engine`] handle instead of ambient global state

pub mod cache;
pub mod convert;
pub mod error;
pub mod metrics;
pub mod snapshot;
pub mod unit;

pub use cache::{FingerprintInputs, MetricsCache, fingerprint};
pub use error::{Error, Result};
pub use metrics::{
    BASELINE_DPI, DeriveParams, ReferenceSize, TargetMetrics, derive, restore_defaults,
};
pub use snapshot::{DeviceSnapshot, MeasurementChange};
pub use unit::{MM_PER_INCH, POINTS_PER_INCH, Subunit, UnitPolicy};

use std::sync::{Mutex, PoisonError};

/// Default design sizes applied at [`Engine::initialize`] when the host never
/// set one. The sub-unit presets match common design-tool canvases measured
/// in px rather than dp.
const DEFAULT_DESIGN_WIDTH_DP: f64 = 360.0;
const DEFAULT_DESIGN_HEIGHT_DP: f64 = 640.0;
const DEFAULT_SUBUNIT_DESIGN_WIDTH: f64 = 1080.0;
const DEFAULT_SUBUNIT_DESIGN_HEIGHT: f64 = 1920.0;

/// Cumulative cache observability counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub computed: u64,
    pub hits: u64,
}

#[derive(Debug, Clone)]
struct EngineConfig {
    design_width_in_dp: f64,
    design_height_in_dp: f64,
    base_on_width: bool,
    use_device_size: bool,
    exclude_font_scale: bool,
    private_font_scale: f64,
    unit_policy: UnitPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            design_width_in_dp: 0.0,
            design_height_in_dp: 0.0,
            base_on_width: true,
            use_device_size: true,
            exclude_font_scale: false,
            private_font_scale: 0.0,
            unit_policy: UnitPolicy::default(),
        }
    }
}

#[derive(Debug, Default)]
struct EngineState {
    config: EngineConfig,
    snapshot: Option<DeviceSnapshot>,
    cache: MetricsCache,
    stopped: bool,
}

/// The process-wide scaling context: configuration, the live device snapshot
/// and the metrics cache, guarded together by one mutex so a snapshot update
/// and the cache reset it forces are atomic relative to in-flight lookups.
///
/// Construct with the `with_*` builders, then arm it once with
/// [`initialize`](Self::initialize):
///
/// ```
/// use dpfit_core::{DeviceSnapshot, Engine, ReferenceSize};
///
/// let engine = Engine::new().with_design_size(360.0, 640.0);
/// engine.initialize(DeviceSnapshot {
///     screen_width_px: 1080,
///     screen_height_px: 1920,
///     status_bar_height_px: 0,
///     init_density: 2.0,
///     init_density_dpi: 320,
///     init_scaled_density: 2.0,
///     init_xdpi: 320.0,
///     init_screen_width_dp: 540,
///     init_screen_height_dp: 960,
///     portrait: true,
/// });
/// let metrics = engine.adapt(ReferenceSize::width(360.0)).unwrap();
/// assert_eq!(metrics.density, 3.0);
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    inner: Mutex<EngineState>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global design size in dp (width, height). Values `<= 0` keep the
    /// subunit-dependent defaults applied at [`initialize`](Self::initialize).
    pub fn with_design_size(mut self, width_in_dp: f64, height_in_dp: f64) -> Self {
        let state = self.state_mut();
        state.config.design_width_in_dp = width_in_dp;
        state.config.design_height_in_dp = height_in_dp;
        self
    }

    /// Global scaling axis: `true` scales by width (the default), `false` by
    /// height.
    pub fn with_base_on_width(mut self, base_on_width: bool) -> Self {
        self.state_mut().config.base_on_width = base_on_width;
        self
    }

    /// Whether the height axis includes system-reserved chrome. Defaults to
    /// `true`.
    pub fn with_use_device_size(mut self, use_device_size: bool) -> Self {
        self.state_mut().config.use_device_size = use_device_size;
        self
    }

    /// When set, `sp` ignores the system font scale entirely.
    pub fn with_exclude_font_scale(mut self, exclude_font_scale: bool) -> Self {
        self.state_mut().config.exclude_font_scale = exclude_font_scale;
        self
    }

    /// App-private font scale, decoupling `sp` from the system setting.
    /// `<= 0` disables it.
    pub fn with_private_font_scale(mut self, private_font_scale: f64) -> Self {
        self.state_mut().config.private_font_scale = private_font_scale;
        self
    }

    pub fn with_unit_policy(mut self, unit_policy: UnitPolicy) -> Self {
        self.state_mut().config.unit_policy = unit_policy;
        self
    }

    /// Arms the engine with the device's current measurements. Design sizes
    /// still unset fall back to the defaults for the active sub-unit mode.
    /// Re-initializing replaces the snapshot and clears the cache.
    pub fn initialize(&self, snapshot: DeviceSnapshot) {
        let mut state = self.lock();
        if state.config.design_width_in_dp <= 0.0 || state.config.design_height_in_dp <= 0.0 {
            let (width, height) = if state.config.unit_policy.subunit == Subunit::None {
                (DEFAULT_DESIGN_WIDTH_DP, DEFAULT_DESIGN_HEIGHT_DP)
            } else {
                (DEFAULT_SUBUNIT_DESIGN_WIDTH, DEFAULT_SUBUNIT_DESIGN_HEIGHT)
            };
            if state.config.design_width_in_dp <= 0.0 {
                state.config.design_width_in_dp = width;
            }
            if state.config.design_height_in_dp <= 0.0 {
                state.config.design_height_in_dp = height;
            }
        }
        tracing::debug!(
            design_width_in_dp = state.config.design_width_in_dp,
            design_height_in_dp = state.config.design_height_in_dp,
            screen_width_px = snapshot.screen_width_px,
            screen_height_px = snapshot.screen_height_px,
            init_density = snapshot.init_density,
            init_scaled_density = snapshot.init_scaled_density,
            "engine initialized"
        );
        state.snapshot = Some(snapshot);
        state.cache.reset();
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().snapshot.is_some()
    }

    /// Adapts using the global design size and the global scaling axis.
    pub fn adapt_global(&self) -> Result<TargetMetrics> {
        let mut state = self.lock();
        let reference = ReferenceSize {
            size_in_dp: 0.0,
            base_on_width: state.config.base_on_width,
        };
        Self::adapt_locked(&mut state, reference, None)
    }

    /// The hot entry point: computes (or recalls) the metrics for one
    /// reference size. A `size_in_dp <= 0` falls back to the global design
    /// size for the reference's axis.
    pub fn adapt(&self, reference: ReferenceSize) -> Result<TargetMetrics> {
        let mut state = self.lock();
        Self::adapt_locked(&mut state, reference, None)
    }

    /// Like [`adapt`](Self::adapt), but the given policy replaces the
    /// engine's unit policy wholesale for this call, including its sub-unit
    /// design sizes.
    pub fn adapt_with_policy(
        &self,
        reference: ReferenceSize,
        policy: &UnitPolicy,
    ) -> Result<TargetMetrics> {
        let mut state = self.lock();
        Self::adapt_locked(&mut state, reference, Some(policy))
    }

    /// Metrics that revert the platform to its untouched defaults.
    pub fn cancel_adapt(&self) -> Result<TargetMetrics> {
        let state = self.lock();
        let snapshot = state.snapshot.ok_or(Error::NotInitialized)?;
        Ok(restore_defaults(&snapshot, state.config.unit_policy.subunit))
    }

    /// Applies a configuration-change notification: mutates the snapshot in
    /// place and clears the cache, atomically with respect to any `adapt*`
    /// call.
    pub fn notify_measurements_changed(&self, change: MeasurementChange) -> Result<()> {
        let mut state = self.lock();
        let snapshot = state.snapshot.as_mut().ok_or(Error::NotInitialized)?;
        snapshot.apply(&change);
        tracing::debug!(
            screen_width_px = snapshot.screen_width_px,
            screen_height_px = snapshot.screen_height_px,
            init_scaled_density = snapshot.init_scaled_density,
            "device measurements changed, cache reset"
        );
        state.cache.reset();
        Ok(())
    }

    /// Discards all cached metrics without touching the snapshot.
    pub fn reset_cache(&self) {
        self.lock().cache.reset();
    }

    pub fn cache_stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.cache.len(),
            computed: state.cache.computed(),
            hits: state.cache.hits(),
        }
    }

    /// Suspends adaptation: while stopped, `adapt*` returns the restore
    /// defaults so call sites fall back to the platform's own metrics.
    pub fn stop(&self) {
        self.lock().stopped = true;
    }

    /// Resumes adaptation after [`stop`](Self::stop).
    pub fn restart(&self) {
        self.lock().stopped = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    pub fn unit_policy(&self) -> UnitPolicy {
        self.lock().config.unit_policy
    }

    pub fn design_size_in_dp(&self) -> (f64, f64) {
        let state = self.lock();
        (
            state.config.design_width_in_dp,
            state.config.design_height_in_dp,
        )
    }

    // Administrative setters, off the hot path. Each one invalidates the
    // cache when it changes a quantity the fingerprint does not encode.

    pub fn set_design_size(&self, width_in_dp: f64, height_in_dp: f64) {
        let mut state = self.lock();
        state.config.design_width_in_dp = width_in_dp;
        state.config.design_height_in_dp = height_in_dp;
    }

    pub fn set_unit_policy(&self, unit_policy: UnitPolicy) {
        self.lock().config.unit_policy = unit_policy;
    }

    pub fn set_base_on_width(&self, base_on_width: bool) {
        self.lock().config.base_on_width = base_on_width;
    }

    pub fn set_use_device_size(&self, use_device_size: bool) {
        self.lock().config.use_device_size = use_device_size;
    }

    pub fn set_exclude_font_scale(&self, exclude_font_scale: bool) {
        let mut state = self.lock();
        state.config.exclude_font_scale = exclude_font_scale;
        state.cache.reset();
    }

    pub fn set_private_font_scale(&self, private_font_scale: f64) {
        let mut state = self.lock();
        state.config.private_font_scale = private_font_scale;
        state.cache.reset();
    }

    /// Height of the system chrome subtracted from the height axis when
    /// device size is excluded.
    pub fn set_status_bar_height(&self, height_px: i32) -> Result<()> {
        let mut state = self.lock();
        let snapshot = state.snapshot.as_mut().ok_or(Error::NotInitialized)?;
        snapshot.status_bar_height_px = height_px;
        state.cache.reset();
        Ok(())
    }

    fn adapt_locked(
        state: &mut EngineState,
        reference: ReferenceSize,
        policy_override: Option<&UnitPolicy>,
    ) -> Result<TargetMetrics> {
        let snapshot = state.snapshot.ok_or(Error::NotInitialized)?;
        if state.stopped {
            return Ok(restore_defaults(&snapshot, state.config.unit_policy.subunit));
        }

        let base_on_width = reference.base_on_width;
        let mut size_in_dp = reference.size_in_dp;
        if size_in_dp <= 0.0 {
            size_in_dp = if base_on_width {
                state.config.design_width_in_dp
            } else {
                state.config.design_height_in_dp
            };
        }
        if size_in_dp <= 0.0 {
            return Err(Error::InvalidReferenceSize {
                size_in_dp: reference.size_in_dp,
            });
        }

        // A per-call policy replaces the global one wholesale; within the
        // winning policy a positive sub-unit design size beats the effective
        // dp size.
        let policy = policy_override.copied().unwrap_or(state.config.unit_policy);
        let subunits_design_size = policy
            .subunits_design_size(base_on_width)
            .unwrap_or(size_in_dp);

        let axis_screen_px = snapshot.axis_size_px(base_on_width, state.config.use_device_size);
        let key = fingerprint(&FingerprintInputs {
            size_in_dp,
            subunits_design_size,
            axis_screen_px,
            init_scaled_density: snapshot.init_scaled_density,
            base_on_width,
            use_device_size: state.config.use_device_size,
        });

        let params = DeriveParams {
            size_in_dp,
            subunits_design_size,
            base_on_width,
            use_device_size: state.config.use_device_size,
            private_font_scale: state.config.private_font_scale,
            exclude_font_scale: state.config.exclude_font_scale,
        };
        let metrics = state
            .cache
            .get_or_compute(key, || derive(&params, &snapshot));
        tracing::debug!(
            key,
            size_in_dp,
            base_on_width,
            density = metrics.density,
            scaled_density = metrics.scaled_density,
            "adaptation resolved"
        );
        Ok(metrics)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EngineState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut EngineState {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests;
