//! Spotlight: a highlight coordination kernel.
//!
//! Spotlight lets an external inspector (an IDE, a devtools panel, a
//! debugging harness) locate, highlight, and select live UI elements
//! produced by one or more concurrently running renderers inside a host
//! page, and map a selected element back to the source position it was
//! declared at.
//!
//! The kernel owns coordination only: the overlay lifecycle state machine,
//! the debounced/throttled event-to-lookup pipeline, the multi-renderer
//! registry, and the bridge message contract. Drawing the highlight,
//! walking a renderer's tree, and carrying bridge messages over a concrete
//! transport are all host concerns behind traits.
//!
//! # Quick start
//!
//! ```no_run
//! use spotlight::{HighlightSession, SessionConfig, SessionOptions};
//!
//! # async fn run() {
//! let session = HighlightSession::init(SessionConfig::default(), SessionOptions::default());
//! let mut outbound = session.subscribe_outbound();
//! let mut events = session.events();
//! session.start();
//!
//! // Renderers attach as they come up:
//! // session.registry().register(renderer_id, adapter);
//!
//! // The IDE asks for an element by source position:
//! session.highlight_at("src/app.tsx", 42);
//! # }
//! ```

pub mod telemetry;

pub use highlight_agent::{
    ClickEvent, EventDisposition, HighlightMode, HighlightSession, InteractionGate,
    PointerResolver, SessionConfig, SessionEvent, SessionOptions,
};
pub use highlight_overlay::{
    HighlightSink, NativeNotificationSink, Overlay, PaintSurface, ViewportEvent, VisualSink,
};
pub use inspector_bridge::{
    default_component_filters, BackendBridge, BridgeError, FilterStore, InboundHandle,
    InboundMessage, OutboundMessage,
};
pub use spotlight_core_types::{
    ComponentFilter, ComponentFilterKind, ElementId, ElementRef, InspectedElementInfo,
    NodeHandle, OwnerRef, RendererId, SourceLocation, SpotlightError,
};
pub use spotlight_event_bus::{EventBus, InMemoryBus};
pub use spotlight_registry::{RendererAdapter, RendererRegistry, RegistryError, SourceMatch};
pub use spotlight_scheduler::{Debouncer, LastSeen, Throttler};

/// Commonly used imports for embedding hosts.
pub mod prelude {
    pub use crate::{
        ClickEvent, EventDisposition, HighlightSession, NodeHandle, RendererAdapter, RendererId,
        SessionConfig, SessionEvent, SessionOptions, SourceLocation,
    };
}
