use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use highlight_overlay::HighlightSink;
use spotlight_core_types::{ElementRef, NodeHandle};
use spotlight_event_bus::InMemoryBus;
use spotlight_registry::RendererRegistry;
use spotlight_scheduler::{LastSeen, Throttler};

use crate::events::SessionEvent;
use crate::locator::locate_source;
use crate::mode::InteractionGate;

/// Raw capture-phase click delivered by the host.
#[derive(Clone, Copy, Debug)]
pub struct ClickEvent {
    pub target: NodeHandle,
}

/// What the host must do with the event it just delivered.
///
/// The resolver runs in the capture phase; `Consumed` means the host must
/// prevent the default action and stop propagation before the target's own
/// handlers fire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventDisposition {
    Consumed,
    Passthrough,
}

/// Converts raw clicks into element references and drives the downstream
/// source-resolution pipeline.
///
/// Per permitted click: the raw target gets an instant highlight for visual
/// feedback, while source resolution is throttled with the leading edge
/// suppressed (the first click of a lift gesture is usually unintentional)
/// and deduped against the previously resolved target.
pub struct PointerResolver {
    gate: Arc<InteractionGate>,
    registry: Arc<RendererRegistry>,
    sink: Arc<dyn HighlightSink>,
    throttler: Throttler<(NodeHandle, ElementRef)>,
}

impl PointerResolver {
    pub fn new(
        gate: Arc<InteractionGate>,
        registry: Arc<RendererRegistry>,
        sink: Arc<dyn HighlightSink>,
        events: Arc<InMemoryBus<SessionEvent>>,
        request_ids: Arc<AtomicU64>,
        throttle_window: Duration,
    ) -> Self {
        let dedup: Arc<LastSeen<NodeHandle>> = Arc::new(LastSeen::new());
        let walk_registry = Arc::clone(&registry);
        let throttler = Throttler::new(
            throttle_window,
            move |(node, element): (NodeHandle, ElementRef)| {
                if !dedup.admit(node) {
                    debug!(node = node.0, "repeated target, resolution skipped");
                    return;
                }
                let registry = Arc::clone(&walk_registry);
                let events = Arc::clone(&events);
                let request_ids = Arc::clone(&request_ids);
                tokio::spawn(async move {
                    let Some(info) = locate_source(&registry, &request_ids, &element).await
                    else {
                        return;
                    };
                    if let Some(location) = info.source {
                        events.publish_lossy(SessionEvent::SourceLocated(location));
                    }
                });
            },
        );

        Self {
            gate,
            registry,
            sink,
            throttler,
        }
    }

    /// Handle one capture-phase click. Permission is re-checked here on
    /// every event, never cached across events.
    pub async fn on_click(&self, event: ClickEvent) -> EventDisposition {
        if !(self.gate.is_interaction_permitted() && self.gate.mode().is_click()) {
            return EventDisposition::Passthrough;
        }

        let Some(element) = self.registry.id_for_node(event.target).await else {
            return EventDisposition::Consumed;
        };

        // Instant feedback on the raw target, independent of (and never
        // blocked by) source resolution.
        self.sink.show(&[event.target], None, false).await;
        self.throttler.schedule((event.target, element));

        EventDisposition::Consumed
    }

    /// Drop any resolution still waiting on the throttle window.
    pub fn cancel(&self) {
        self.throttler.cancel();
    }
}
