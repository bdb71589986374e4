//! Per-component adaptation overrides for screens whose source cannot be
//! changed (typically third-party components). The host registers overrides
//! once at startup; the strategy consults them before the component's own
//! declared target.

use rustc_hash::FxHashMap;

use dpfit_core::ReferenceSize;

/// Name-keyed registry of cancel entries and custom reference sizes.
///
/// The registry stays inactive until the first registration, so hosts that
/// never use it pay nothing on the adaptation path.
#[derive(Debug, Default)]
pub struct ExternalAdaptRegistry {
    cancelled: Vec<String>,
    overrides: FxHashMap<String, ReferenceSize>,
    active: bool,
}

impl ExternalAdaptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables adaptation for `component`; it will be restored to the
    /// platform defaults instead.
    pub fn cancel(&mut self, component: impl Into<String>) -> &mut Self {
        self.active = true;
        self.cancelled.push(component.into());
        self
    }

    /// Registers a custom reference size for `component`, replacing any
    /// earlier registration.
    pub fn register(&mut self, component: impl Into<String>, reference: ReferenceSize) -> &mut Self {
        self.active = true;
        self.overrides.insert(component.into(), reference);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_cancelled(&self, component: &str) -> bool {
        self.cancelled.iter().any(|name| name == component)
    }

    pub fn reference_for(&self, component: &str) -> Option<ReferenceSize> {
        self.overrides.get(component).copied()
    }
}
