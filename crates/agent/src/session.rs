use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use highlight_overlay::{HighlightSink, NativeNotificationSink, PaintSurface, VisualSink};
use inspector_bridge::{
    BackendBridge, FilterStore, InboundHandle, InboundMessage, OutboundMessage,
};
use spotlight_core_types::ComponentFilter;
use spotlight_event_bus::{EventBus, InMemoryBus};
use spotlight_registry::{RendererAdapter, RendererRegistry};
use spotlight_scheduler::Debouncer;

use crate::config::SessionConfig;
use crate::events::SessionEvent;
use crate::locator::resolve_source_position;
use crate::mode::{HighlightMode, InteractionGate};
use crate::pointer::{ClickEvent, EventDisposition, PointerResolver};

/// Environment-dependent inputs fixed at session construction.
///
/// The sink variant is chosen exactly once from `surface`: paintable hosts
/// get the overlay lifecycle, everything else gets native notifications.
#[derive(Default)]
pub struct SessionOptions {
    pub surface: Option<Arc<dyn PaintSurface>>,
    /// Filter set the host saved from an earlier session, if any. Its mere
    /// presence suppresses the backend's default-filter announcement.
    pub external_filters: Option<Vec<ComponentFilter>>,
}

struct BootState {
    external_filters: Option<Vec<ComponentFilter>>,
}

/// Session-scoped context owning every singleton of the highlight kernel.
///
/// Nothing here is ambient: registry, bridge, sink, gate, and schedulers all
/// live and die with this object. `init` wires, `start` announces, `dispose`
/// tears down.
pub struct HighlightSession {
    registry: Arc<RendererRegistry>,
    bridge: Arc<BackendBridge>,
    sink: Arc<dyn HighlightSink>,
    gate: Arc<InteractionGate>,
    events: Arc<InMemoryBus<SessionEvent>>,
    filters: Arc<FilterStore>,
    pointer: PointerResolver,
    source_lookup: Debouncer<(String, u32)>,
    dispatch: Mutex<Option<JoinHandle<()>>>,
    boot: Mutex<Option<BootState>>,
}

impl HighlightSession {
    /// Wire a session together. No messages leave until [`start`] runs, so
    /// the host can attach its transport first.
    ///
    /// [`start`]: HighlightSession::start
    pub fn init(config: SessionConfig, options: SessionOptions) -> Self {
        let registry = Arc::new(RendererRegistry::new());
        let (bridge, inbound_rx) = BackendBridge::new(config.channel_capacity);

        let sink: Arc<dyn HighlightSink> = match options.surface {
            Some(surface) => Arc::new(VisualSink::new(surface, config.show_duration())),
            None => Arc::new(NativeNotificationSink::new(Arc::clone(&bridge))),
        };

        let gate = Arc::new(InteractionGate::new());
        let events = InMemoryBus::new(config.channel_capacity);
        let filters = Arc::new(FilterStore::new());
        let request_ids = Arc::new(AtomicU64::new(0));

        let pointer = PointerResolver::new(
            Arc::clone(&gate),
            Arc::clone(&registry),
            Arc::clone(&sink),
            Arc::clone(&events),
            request_ids,
            config.click_throttle(),
        );

        let lookup_registry = Arc::clone(&registry);
        let lookup_bridge = Arc::clone(&bridge);
        let source_lookup = Debouncer::new(
            config.source_debounce(),
            move |(file, line): (String, u32)| {
                let registry = Arc::clone(&lookup_registry);
                let bridge = Arc::clone(&lookup_bridge);
                tokio::spawn(async move {
                    resolve_source_position(&registry, &bridge, &file, line).await;
                });
            },
        );

        let dispatch = tokio::spawn(dispatch_loop(
            inbound_rx,
            Arc::clone(&registry),
            Arc::clone(&bridge),
            Arc::clone(&filters),
        ));

        Self {
            registry,
            bridge,
            sink,
            gate,
            events,
            filters,
            pointer,
            source_lookup,
            dispatch: Mutex::new(Some(dispatch)),
            boot: Mutex::new(Some(BootState {
                external_filters: options.external_filters,
            })),
        }
    }

    /// Run startup filter negotiation and announce readiness. Idempotent:
    /// the negotiation happens at most once per session.
    pub fn start(&self) {
        let Some(boot) = self.boot.lock().take() else {
            return;
        };
        self.filters
            .negotiate_startup(boot.external_filters, &self.bridge);
        self.events.publish_lossy(SessionEvent::Ready);
        info!("highlight session started");
    }

    /// Tear the session down: stop dispatch, drop pending lookups, disable
    /// interaction, hide whatever is showing. The session is inert after.
    pub async fn dispose(&self) {
        if let Some(task) = self.dispatch.lock().take() {
            task.abort();
        }
        self.source_lookup.cancel();
        self.pointer.cancel();
        self.gate.set_mode(HighlightMode::Disabled);
        self.sink.hide().await;
        info!("highlight session disposed");
    }

    pub fn registry(&self) -> Arc<RendererRegistry> {
        Arc::clone(&self.registry)
    }

    /// Injection point the host transport feeds inspector messages into.
    pub fn inbound_handle(&self) -> InboundHandle {
        self.bridge.inbound_handle()
    }

    /// Outbound bridge stream for the host transport.
    pub fn subscribe_outbound(&self) -> broadcast::Receiver<OutboundMessage> {
        self.bridge.subscribe()
    }

    /// Host-facing session events (readiness, resolved source locations).
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn component_filters(&self) -> Vec<ComponentFilter> {
        self.filters.snapshot()
    }

    pub async fn set_click_mode(&self) {
        self.gate.set_mode(HighlightMode::Click);
        self.sink.hide().await;
    }

    pub async fn set_hover_mode(&self) {
        self.gate.set_mode(HighlightMode::Hover);
        self.sink.hide().await;
    }

    pub async fn disable_highlighting(&self) {
        self.gate.set_mode(HighlightMode::Disabled);
        self.sink.hide().await;
    }

    /// Opening the properties editor suspends interactive highlighting;
    /// either way the current overlay is cleared.
    pub async fn set_properties_edit_panel(&self, active: bool) {
        self.gate.set_properties_edit_panel(active);
        self.sink.hide().await;
    }

    pub fn is_interaction_permitted(&self) -> bool {
        self.gate.is_interaction_permitted()
    }

    /// IDE-side request: find and highlight the element declared at
    /// `file:line`. Debounced; only the last call of a rapid burst runs.
    pub fn highlight_at(&self, file: &str, line: u32) {
        self.source_lookup.schedule((file.to_owned(), line));
    }

    /// Capture-phase click entry point for the host.
    pub async fn on_click(&self, event: ClickEvent) -> EventDisposition {
        self.pointer.on_click(event).await
    }
}

async fn dispatch_loop(
    mut inbound: mpsc::Receiver<InboundMessage>,
    registry: Arc<RendererRegistry>,
    bridge: Arc<BackendBridge>,
    filters: Arc<FilterStore>,
) {
    while let Some(message) = inbound.recv().await {
        match message {
            InboundMessage::InspectElement { id, renderer_id } => {
                let adapter = match registry.adapter(&renderer_id) {
                    Ok(adapter) => adapter,
                    Err(err) => {
                        warn!(renderer = %renderer_id, element = %id, "inspect request dropped: {err}");
                        continue;
                    }
                };
                let nodes = adapter.find_native_nodes(id).await;
                if let Some(first) = nodes.first() {
                    bridge.send(OutboundMessage::ShowNativeHighlight { node: *first });
                }
            }
            InboundMessage::UpdateComponentFilters(next) => {
                filters.apply_update(next);
            }
        }
    }
}
