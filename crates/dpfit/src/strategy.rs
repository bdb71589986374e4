//! Resolves what one component wants out of adaptation and runs the whole
//! flow: precedence resolution, engine call, sink writes, listener
//! notifications.

use dpfit_core::{Engine, ReferenceSize, Result, TargetMetrics};

use crate::external::ExternalAdaptRegistry;
use crate::sink::{MetricsSink, apply_metrics};

/// What a component declares about its own adaptation, resolved once per call
/// site before the engine is involved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AdaptTarget {
    /// Use the globally configured design size and axis.
    #[default]
    Global,
    /// The component supplies its own reference size.
    Custom(ReferenceSize),
    /// The component opts out; it gets the platform defaults.
    Cancel,
}

/// Observer for adaptation events, notified around each applied adaptation.
pub trait AdaptListener {
    fn on_adapt_before(&mut self, _component: &str) {}
    fn on_adapt_after(&mut self, _component: &str, _metrics: &TargetMetrics) {}
}

/// Default resolution order: an external-registry cancel beats an external
/// override, which beats whatever the component declared itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdaptStrategy;

impl DefaultAdaptStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Runs one adaptation end to end and returns the metrics that were
    /// applied to the sinks.
    pub fn apply(
        &self,
        engine: &Engine,
        registry: &ExternalAdaptRegistry,
        component: &str,
        target: AdaptTarget,
        sinks: &mut [&mut dyn MetricsSink],
        mut listener: Option<&mut dyn AdaptListener>,
    ) -> Result<TargetMetrics> {
        if let Some(listener) = listener.as_deref_mut() {
            listener.on_adapt_before(component);
        }

        let metrics = self.resolve(engine, registry, component, target)?;
        apply_metrics(&metrics, &engine.unit_policy(), sinks);

        if let Some(listener) = listener.as_deref_mut() {
            listener.on_adapt_after(component, &metrics);
        }
        Ok(metrics)
    }

    fn resolve(
        &self,
        engine: &Engine,
        registry: &ExternalAdaptRegistry,
        component: &str,
        target: AdaptTarget,
    ) -> Result<TargetMetrics> {
        if registry.is_active() {
            if registry.is_cancelled(component) {
                tracing::warn!(component, "adaptation cancelled by external registry");
                return engine.cancel_adapt();
            }
            if let Some(reference) = registry.reference_for(component) {
                tracing::debug!(
                    component,
                    size_in_dp = reference.size_in_dp,
                    base_on_width = reference.base_on_width,
                    "using external adaptation parameters"
                );
                return engine.adapt(reference);
            }
        }

        match target {
            AdaptTarget::Cancel => {
                tracing::warn!(component, "component opted out of adaptation");
                engine.cancel_adapt()
            }
            AdaptTarget::Custom(reference) => {
                tracing::debug!(
                    component,
                    size_in_dp = reference.size_in_dp,
                    base_on_width = reference.base_on_width,
                    "using the component's own adaptation parameters"
                );
                engine.adapt(reference)
            }
            AdaptTarget::Global => {
                tracing::debug!(component, "using the global configuration");
                engine.adapt_global()
            }
        }
    }
}
