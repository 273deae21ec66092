use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use crate::messages::{InboundMessage, OutboundMessage};

/// Errors surfaced by the bridge endpoint.
#[derive(Clone, Debug, Error)]
pub enum BridgeError {
    #[error("inbound channel closed")]
    ChannelClosed,
    #[error("inbound channel full")]
    ChannelFull,
}

/// In-process endpoint of the inspector bridge.
///
/// Outbound sends are non-blocking fire-and-forget: the backend never waits
/// on a reply before returning control to the event loop, and a send with no
/// attached transport is silently dropped. Inbound messages queue in strict
/// delivery order; the session's dispatch loop drains them one at a time.
pub struct BackendBridge {
    outbound: broadcast::Sender<OutboundMessage>,
    inbound: mpsc::Sender<InboundMessage>,
}

impl BackendBridge {
    pub fn new(capacity: usize) -> (Arc<Self>, mpsc::Receiver<InboundMessage>) {
        let (outbound, _) = broadcast::channel(capacity.max(1));
        let (inbound, inbound_rx) = mpsc::channel(capacity.max(1));
        (Arc::new(Self { outbound, inbound }), inbound_rx)
    }

    pub fn send(&self, message: OutboundMessage) {
        debug!(?message, "bridge send");
        let _ = self.outbound.send(message);
    }

    /// Attach a transport (or a test harness) to the outbound stream.
    pub fn subscribe(&self) -> broadcast::Receiver<OutboundMessage> {
        self.outbound.subscribe()
    }

    /// Handle the host-side transport uses to inject inbound messages.
    pub fn inbound_handle(&self) -> InboundHandle {
        InboundHandle {
            tx: self.inbound.clone(),
        }
    }
}

/// Cloneable injection point for inbound inspector messages.
#[derive(Clone)]
pub struct InboundHandle {
    tx: mpsc::Sender<InboundMessage>,
}

impl InboundHandle {
    pub async fn deliver(&self, message: InboundMessage) -> Result<(), BridgeError> {
        self.tx
            .send(message)
            .await
            .map_err(|_| BridgeError::ChannelClosed)
    }

    pub fn try_deliver(&self, message: InboundMessage) -> Result<(), BridgeError> {
        self.tx.try_send(message).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => BridgeError::ChannelFull,
            mpsc::error::TrySendError::Closed(_) => BridgeError::ChannelClosed,
        })
    }
}
