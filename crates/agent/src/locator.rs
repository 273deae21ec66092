use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use inspector_bridge::{BackendBridge, OutboundMessage};
use spotlight_core_types::{ElementRef, InspectedElementInfo};
use spotlight_registry::{RendererAdapter, RendererRegistry};

fn next_request_id(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

/// Walk an element's owner chain to the nearest declared source position.
///
/// The element's own inspection payload wins outright; otherwise owners are
/// consulted in their given order (most-immediate declaring scope first) and
/// the first carrying a source short-circuits the walk. This is a linear
/// ancestor search, never a tree re-traversal.
pub async fn locate_source(
    registry: &RendererRegistry,
    request_ids: &AtomicU64,
    target: &ElementRef,
) -> Option<InspectedElementInfo> {
    let adapter = match registry.adapter(&target.renderer) {
        Ok(adapter) => adapter,
        Err(err) => {
            warn!(renderer = %target.renderer, element = %target.element, "source walk aborted: {err}");
            return None;
        }
    };

    let info = adapter
        .inspect_element(next_request_id(request_ids), target.element)
        .await?;
    if info.source.is_some() {
        return Some(info);
    }

    for owner in &info.owners {
        if let Some(owner_info) = adapter
            .inspect_element(next_request_id(request_ids), owner.id)
            .await
        {
            if owner_info.source.is_some() {
                debug!(element = %target.element, owner = %owner.id, "source found on owner");
                return Some(owner_info);
            }
        }
    }

    None
}

/// Resolve `(file, line)` to an element across every registered renderer and
/// report the outcome on the bridge.
///
/// The first renderer (in registration order) with a match wins; the rest
/// are never consulted. A miss is non-fatal: one diagnostic, one stop
/// signal, nothing raised to the caller.
pub async fn resolve_source_position(
    registry: &RendererRegistry,
    bridge: &BackendBridge,
    file: &str,
    line: u32,
) {
    match registry.find_by_source_location(file, line).await {
        Some((renderer_id, found)) => {
            bridge.send(OutboundMessage::HighlightNativeElement {
                id: found.id,
                renderer_id,
                display_name: found.display_name,
            });
        }
        None => {
            warn!(file, line, "no element found at the requested source position");
            bridge.send(OutboundMessage::StopInspectingNative);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use spotlight_core_types::{
        ElementId, NodeHandle, OwnerRef, RendererId, SourceLocation,
    };
    use spotlight_registry::{RendererAdapter, SourceMatch};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct TreeAdapter {
        infos: HashMap<ElementId, InspectedElementInfo>,
    }

    impl TreeAdapter {
        fn new(infos: Vec<InspectedElementInfo>) -> Self {
            Self {
                infos: infos.into_iter().map(|info| (info.id, info)).collect(),
            }
        }
    }

    #[async_trait]
    impl RendererAdapter for TreeAdapter {
        async fn element_for_node(&self, _node: NodeHandle) -> Option<ElementId> {
            None
        }

        async fn find_native_nodes(&self, _element: ElementId) -> Vec<NodeHandle> {
            Vec::new()
        }

        async fn find_by_source_location(&self, _file: &str, _line: u32) -> Option<SourceMatch> {
            None
        }

        async fn inspect_element(
            &self,
            _request_id: u64,
            element: ElementId,
        ) -> Option<InspectedElementInfo> {
            self.infos.get(&element).cloned()
        }
    }

    fn registry_with(adapter: TreeAdapter) -> (RendererRegistry, RendererId) {
        let registry = RendererRegistry::new();
        let id = RendererId::new();
        registry.register(id.clone(), Arc::new(adapter));
        (registry, id)
    }

    fn source(file: &str) -> SourceLocation {
        SourceLocation::new(file, 12, 4)
    }

    #[tokio::test]
    async fn element_with_its_own_source_wins_immediately() {
        let adapter = TreeAdapter::new(vec![
            InspectedElementInfo::new(ElementId(1))
                .with_source(source("src/button.tsx"))
                .with_owners(vec![OwnerRef { id: ElementId(2) }]),
            InspectedElementInfo::new(ElementId(2)).with_source(source("src/panel.tsx")),
        ]);
        let (registry, renderer) = registry_with(adapter);
        let ids = AtomicU64::new(0);

        let info = locate_source(
            &registry,
            &ids,
            &ElementRef::new(renderer, ElementId(1)),
        )
        .await
        .unwrap();
        assert_eq!(info.source.unwrap().file, "src/button.tsx");
    }

    #[tokio::test]
    async fn first_owner_with_source_shadows_later_owners() {
        let adapter = TreeAdapter::new(vec![
            InspectedElementInfo::new(ElementId(1)).with_owners(vec![
                OwnerRef { id: ElementId(2) },
                OwnerRef { id: ElementId(3) },
            ]),
            InspectedElementInfo::new(ElementId(2)).with_source(source("src/near.tsx")),
            InspectedElementInfo::new(ElementId(3)).with_source(source("src/far.tsx")),
        ]);
        let (registry, renderer) = registry_with(adapter);
        let ids = AtomicU64::new(0);

        let info = locate_source(
            &registry,
            &ids,
            &ElementRef::new(renderer, ElementId(1)),
        )
        .await
        .unwrap();
        assert_eq!(info.source.unwrap().file, "src/near.tsx");
    }

    #[tokio::test]
    async fn sourceless_owners_are_skipped_not_fatal() {
        let adapter = TreeAdapter::new(vec![
            InspectedElementInfo::new(ElementId(1)).with_owners(vec![
                OwnerRef { id: ElementId(2) },
                OwnerRef { id: ElementId(3) },
            ]),
            InspectedElementInfo::new(ElementId(2)),
            InspectedElementInfo::new(ElementId(3)).with_source(source("src/root.tsx")),
        ]);
        let (registry, renderer) = registry_with(adapter);
        let ids = AtomicU64::new(0);

        let info = locate_source(
            &registry,
            &ids,
            &ElementRef::new(renderer, ElementId(1)),
        )
        .await
        .unwrap();
        assert_eq!(info.source.unwrap().file, "src/root.tsx");
    }

    #[tokio::test]
    async fn exhausted_owner_chain_returns_none() {
        let adapter = TreeAdapter::new(vec![
            InspectedElementInfo::new(ElementId(1))
                .with_owners(vec![OwnerRef { id: ElementId(2) }]),
            InspectedElementInfo::new(ElementId(2)),
        ]);
        let (registry, renderer) = registry_with(adapter);
        let ids = AtomicU64::new(0);

        assert!(locate_source(
            &registry,
            &ids,
            &ElementRef::new(renderer, ElementId(1))
        )
        .await
        .is_none());
    }

    #[tokio::test]
    async fn stale_renderer_reference_aborts_quietly() {
        let registry = RendererRegistry::new();
        let ids = AtomicU64::new(0);

        assert!(locate_source(
            &registry,
            &ids,
            &ElementRef::new(RendererId::new(), ElementId(1))
        )
        .await
        .is_none());
    }

    #[tokio::test]
    async fn request_ids_are_monotonic() {
        let counter = AtomicU64::new(0);
        assert_eq!(next_request_id(&counter), 1);
        assert_eq!(next_request_id(&counter), 2);
    }
}
