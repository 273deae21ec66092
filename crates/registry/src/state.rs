use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use spotlight_core_types::{ElementRef, NodeHandle, RendererId};

use crate::{
    api::{RendererAdapter, SourceMatch},
    errors::RegistryError,
    metrics,
};

/// Mutable set of live renderer adapters for one backend session.
///
/// Renderers attach and detach over the session lifetime. Registration order
/// is preserved and is load-bearing: file/line searches consult renderers in
/// the order they attached, and the first match wins.
pub struct RendererRegistry {
    adapters: DashMap<RendererId, Arc<dyn RendererAdapter>>,
    order: Mutex<Vec<RendererId>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            adapters: DashMap::new(),
            order: Mutex::new(Vec::new()),
        }
    }

    /// Attach an adapter. Re-registering an id replaces the adapter without
    /// changing its position in the consultation order.
    pub fn register(&self, id: RendererId, adapter: Arc<dyn RendererAdapter>) {
        self.adapters.insert(id.clone(), adapter);
        let mut order = self.order.lock();
        if !order.iter().any(|existing| existing == &id) {
            order.push(id);
        }
        metrics::set_renderer_count(order.len());
    }

    pub fn unregister(&self, id: &RendererId) -> Result<(), RegistryError> {
        if self.adapters.remove(id).is_none() {
            return Err(RegistryError::NotFound);
        }
        let mut order = self.order.lock();
        order.retain(|existing| existing != id);
        metrics::set_renderer_count(order.len());
        Ok(())
    }

    pub fn get(&self, id: &RendererId) -> Option<Arc<dyn RendererAdapter>> {
        self.adapters
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Like `get`, for callers that treat a stale renderer id as an error.
    pub fn adapter(&self, id: &RendererId) -> Result<Arc<dyn RendererAdapter>, RegistryError> {
        self.get(id).ok_or(RegistryError::NotFound)
    }

    /// Snapshot of all adapters in registration order.
    pub fn renderers(&self) -> Vec<(RendererId, Arc<dyn RendererAdapter>)> {
        let order = self.order.lock();
        order
            .iter()
            .filter_map(|id| self.get(id).map(|adapter| (id.clone(), adapter)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.lock().is_empty()
    }

    /// Reverse-resolve a host-native node to the first renderer claiming it.
    pub async fn id_for_node(&self, node: NodeHandle) -> Option<ElementRef> {
        metrics::record_node_lookup();
        for (id, adapter) in self.renderers() {
            if let Some(element) = adapter.element_for_node(node).await {
                debug!(renderer = %id, element = %element, "resolved node to element");
                return Some(ElementRef::new(id, element));
            }
        }
        None
    }

    /// Ask each renderer, in registration order, for an element declared at
    /// `file:line`; stop at the first that answers.
    pub async fn find_by_source_location(
        &self,
        file: &str,
        line: u32,
    ) -> Option<(RendererId, SourceMatch)> {
        for (id, adapter) in self.renderers() {
            if let Some(found) = adapter.find_by_source_location(file, line).await {
                metrics::record_source_search(true);
                debug!(renderer = %id, element = %found.id, "source position matched");
                return Some((id, found));
            }
        }
        metrics::record_source_search(false);
        None
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}
