use async_trait::async_trait;
use spotlight_core_types::{ElementId, InspectedElementInfo, NodeHandle};

/// Best-effort match reported by a renderer for a source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceMatch {
    pub id: ElementId,
    pub display_name: String,
}

/// Capability surface every registered renderer must provide.
///
/// The kernel never walks a renderer's tree itself; these four lookups are
/// the whole contract. All of them are best-effort: `None`/empty means the
/// renderer has no answer, not that something went wrong.
#[async_trait]
pub trait RendererAdapter: Send + Sync {
    /// Reverse lookup from a host-native node to the element rendered into it.
    async fn element_for_node(&self, node: NodeHandle) -> Option<ElementId>;

    /// Host-native nodes an element is currently rendered into, if any.
    async fn find_native_nodes(&self, element: ElementId) -> Vec<NodeHandle>;

    /// Renderer-specific search for an element declared at `file:line`.
    /// Matching semantics are the renderer's concern.
    async fn find_by_source_location(&self, file: &str, line: u32) -> Option<SourceMatch>;

    /// Inspection payload for one element. `request_id` correlates log lines
    /// across one resolution; renderers echo it, nothing more.
    async fn inspect_element(
        &self,
        request_id: u64,
        element: ElementId,
    ) -> Option<InspectedElementInfo>;
}
