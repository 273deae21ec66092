//! Inspector bridge: the named-message contract between this backend and an
//! external inspector frontend, plus the in-process endpoint behind it.
//!
//! The transport itself (in-process emit, postMessage, a native channel) is
//! an external collaborator: the endpoint only exposes a fire-and-forget
//! outbound send and a strictly ordered inbound queue.

pub mod endpoint;
pub mod filters;
pub mod messages;

pub use endpoint::{BackendBridge, BridgeError, InboundHandle};
pub use filters::{default_component_filters, FilterStore};
pub use messages::{InboundMessage, OutboundMessage};
