use parking_lot::Mutex;
use tracing::debug;

use spotlight_core_types::{ComponentFilter, ELEMENT_TYPE_OTHER_OR_UNKNOWN};

use crate::endpoint::BackendBridge;
use crate::messages::OutboundMessage;

/// Filters the backend proposes when the host has not saved any.
pub fn default_component_filters() -> Vec<ComponentFilter> {
    vec![ComponentFilter::element_type(ELEMENT_TYPE_OTHER_OR_UNKNOWN)]
}

/// Last-known component filter set for one backend session.
///
/// Held in memory only so a recreated backend can reapply what the inspector
/// last sent; filter state is lost across backend reloads and that loss is
/// accepted.
pub struct FilterStore {
    filters: Mutex<Vec<ComponentFilter>>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self {
            filters: Mutex::new(default_component_filters()),
        }
    }

    /// Startup negotiation. Exactly one filter set is authoritative per
    /// session: an externally supplied one wins outright and no override is
    /// sent; otherwise the backend's defaults are announced once.
    ///
    /// Presence decides, not validity: an empty external set still counts as
    /// supplied.
    pub fn negotiate_startup(
        &self,
        external: Option<Vec<ComponentFilter>>,
        bridge: &BackendBridge,
    ) {
        match external {
            Some(filters) => {
                debug!(count = filters.len(), "using externally supplied filters");
                *self.filters.lock() = filters;
            }
            None => {
                let defaults = self.snapshot();
                bridge.send(OutboundMessage::OverrideComponentFilters(defaults));
            }
        }
    }

    /// Replace the snapshot wholesale; updates are never merged.
    pub fn apply_update(&self, filters: Vec<ComponentFilter>) {
        debug!(count = filters.len(), "component filters replaced");
        *self.filters.lock() = filters;
    }

    pub fn snapshot(&self) -> Vec<ComponentFilter> {
        self.filters.lock().clone()
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}
