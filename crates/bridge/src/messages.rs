use serde::{Deserialize, Serialize};

use spotlight_core_types::{ComponentFilter, ElementId, NodeHandle, RendererId};

/// Messages the inspector frontend sends to this backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum InboundMessage {
    /// Ask the backend to surface one element natively.
    #[serde(rename_all = "camelCase")]
    InspectElement {
        id: ElementId,
        renderer_id: RendererId,
    },
    /// Wholesale replacement of the active component filter set.
    UpdateComponentFilters(Vec<ComponentFilter>),
}

/// Messages this backend sends to the inspector frontend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Backend-computed default filters, sent once at boot when the host
    /// supplied none of its own.
    OverrideComponentFilters(Vec<ComponentFilter>),
    /// A file/line search matched this element.
    #[serde(rename_all = "camelCase")]
    HighlightNativeElement {
        id: ElementId,
        renderer_id: RendererId,
        display_name: String,
    },
    /// A file/line search matched nothing; clear any lingering highlight.
    StopInspectingNative,
    /// Headless-mode equivalent of showing the overlay.
    ShowNativeHighlight { node: NodeHandle },
    /// Headless-mode equivalent of hiding the overlay.
    HideNativeHighlight,
}
