//! End-to-end click-to-source flow against a paintable surface.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::time::sleep;

use spotlight::{
    ClickEvent, ElementId, EventDisposition, HighlightSession, InspectedElementInfo, NodeHandle,
    Overlay, OwnerRef, PaintSurface, RendererAdapter, RendererId, SessionConfig, SessionEvent,
    SessionOptions, SourceLocation, SourceMatch, ViewportEvent,
};

struct PageAdapter {
    clickable: Vec<(NodeHandle, ElementId)>,
    infos: Vec<InspectedElementInfo>,
}

#[async_trait]
impl RendererAdapter for PageAdapter {
    async fn element_for_node(&self, node: NodeHandle) -> Option<ElementId> {
        self.clickable
            .iter()
            .find(|(known, _)| *known == node)
            .map(|(_, element)| *element)
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
        self.infos.iter().find(|info| info.id == element).cloned()
    }
}

struct TestOverlay {
    inspects: Mutex<Vec<Vec<NodeHandle>>>,
    removes: AtomicUsize,
}

impl Overlay for TestOverlay {
    fn inspect(&self, elements: &[NodeHandle], _label: Option<&str>) {
        self.inspects.lock().push(elements.to_vec());
    }

    fn remove(&self) {
        self.removes.fetch_add(1, Ordering::SeqCst);
    }
}

struct TestSurface {
    overlay: Arc<TestOverlay>,
    events: broadcast::Sender<ViewportEvent>,
}

impl TestSurface {
    fn new() -> (Arc<Self>, Arc<TestOverlay>) {
        let overlay = Arc::new(TestOverlay {
            inspects: Mutex::new(Vec::new()),
            removes: AtomicUsize::new(0),
        });
        let (events, _) = broadcast::channel(8);
        (
            Arc::new(Self {
                overlay: Arc::clone(&overlay),
                events,
            }),
            overlay,
        )
    }
}

impl PaintSurface for TestSurface {
    fn create_overlay(&self) -> Arc<dyn Overlay> {
        Arc::clone(&self.overlay) as Arc<dyn Overlay>
    }

    fn viewport_events(&self) -> broadcast::Receiver<ViewportEvent> {
        self.events.subscribe()
    }
}

fn page_session() -> (HighlightSession, Arc<TestSurface>, Arc<TestOverlay>) {
    let (surface, overlay) = TestSurface::new();
    let session = HighlightSession::init(
        SessionConfig::default(),
        SessionOptions {
            surface: Some(Arc::clone(&surface) as Arc<dyn PaintSurface>),
            external_filters: None,
        },
    );
    session.start();

    session.registry().register(
        RendererId::new(),
        Arc::new(PageAdapter {
            clickable: vec![(NodeHandle(1), ElementId(10))],
            infos: vec![
                // The clicked element has no source of its own; its nearest
                // owner does.
                InspectedElementInfo::new(ElementId(10)).with_owners(vec![
                    OwnerRef { id: ElementId(11) },
                    OwnerRef { id: ElementId(12) },
                ]),
                InspectedElementInfo::new(ElementId(11))
                    .with_source(SourceLocation::new("src/widgets/button.tsx", 17, 9)),
                InspectedElementInfo::new(ElementId(12))
                    .with_source(SourceLocation::new("src/app.tsx", 2, 1)),
            ],
        }),
    );

    (session, surface, overlay)
}

#[tokio::test(start_paused = true)]
async fn click_highlights_instantly_and_resolves_the_nearest_owner() {
    let (session, _surface, overlay) = page_session();
    let mut events = session.events();
    let _ = events.try_recv(); // Ready

    let disposition = session.on_click(ClickEvent { target: NodeHandle(1) }).await;
    assert_eq!(disposition, EventDisposition::Consumed);

    // Instant transient feedback on the raw target.
    assert_eq!(overlay.inspects.lock().len(), 1);
    assert_eq!(overlay.inspects.lock()[0], vec![NodeHandle(1)]);

    // Source resolution trails the throttle window and names the nearest
    // owner, not the farther one.
    sleep(Duration::from_millis(250)).await;
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::SourceLocated(SourceLocation::new("src/widgets/button.tsx", 17, 9))
    );
}

#[tokio::test(start_paused = true)]
async fn viewport_changes_reproject_the_current_highlight() {
    let (session, surface, overlay) = page_session();

    session.on_click(ClickEvent { target: NodeHandle(1) }).await;
    assert_eq!(overlay.inspects.lock().len(), 1);

    surface.events.send(ViewportEvent::Scrolled).unwrap();
    sleep(Duration::from_millis(1)).await;

    assert_eq!(overlay.inspects.lock().len(), 2);
    assert_eq!(overlay.inspects.lock()[1], vec![NodeHandle(1)]);
}

#[tokio::test(start_paused = true)]
async fn properties_editor_suspends_the_whole_pipeline() {
    let (session, _surface, overlay) = page_session();
    let mut events = session.events();
    let _ = events.try_recv();

    session.set_properties_edit_panel(true).await;
    assert!(!session.is_interaction_permitted());

    let disposition = session.on_click(ClickEvent { target: NodeHandle(1) }).await;
    assert_eq!(disposition, EventDisposition::Passthrough);

    sleep(Duration::from_millis(400)).await;
    assert_eq!(overlay.inspects.lock().len(), 0);
    assert!(events.try_recv().is_err());

    // Closing the panel restores interaction.
    session.set_properties_edit_panel(false).await;
    assert!(session.is_interaction_permitted());
}

#[tokio::test(start_paused = true)]
async fn disabling_highlighting_clears_and_blocks() {
    let (session, _surface, overlay) = page_session();

    session.on_click(ClickEvent { target: NodeHandle(1) }).await;
    session.disable_highlighting().await;
    assert_eq!(overlay.removes.load(Ordering::SeqCst), 1);

    let disposition = session.on_click(ClickEvent { target: NodeHandle(1) }).await;
    assert_eq!(disposition, EventDisposition::Passthrough);
}

#[tokio::test(start_paused = true)]
async fn dispose_leaves_nothing_running() {
    let (session, surface, overlay) = page_session();

    session.on_click(ClickEvent { target: NodeHandle(1) }).await;
    session.dispose().await;
    assert_eq!(overlay.removes.load(Ordering::SeqCst), 1);

    // No re-projection task survives teardown.
    let _ = surface.events.send(ViewportEvent::Resized);
    sleep(Duration::from_millis(10)).await;
    assert_eq!(overlay.inspects.lock().len(), 1);
}
