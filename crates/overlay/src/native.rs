use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use inspector_bridge::{BackendBridge, OutboundMessage};
use spotlight_core_types::NodeHandle;

use crate::api::HighlightSink;

/// Highlight sink for hosts without a paintable surface.
///
/// The whole overlay lifecycle is bypassed: showing forwards only the first
/// element as a native notification and hiding sends the matching clear.
/// This is the designated alternate mode for headless and native embeddings,
/// not a degraded fallback.
pub struct NativeNotificationSink {
    bridge: Arc<BackendBridge>,
}

impl NativeNotificationSink {
    pub fn new(bridge: Arc<BackendBridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl HighlightSink for NativeNotificationSink {
    async fn show(&self, elements: &[NodeHandle], _label: Option<&str>, _auto_hide: bool) {
        let Some(first) = elements.first() else {
            return;
        };
        debug!(node = first.0, "native highlight requested");
        self.bridge
            .send(OutboundMessage::ShowNativeHighlight { node: *first });
    }

    async fn hide(&self) {
        self.bridge.send(OutboundMessage::HideNativeHighlight);
    }
}
