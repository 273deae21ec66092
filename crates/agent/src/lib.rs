//! Coordination layer of the highlight kernel.
//!
//! Ties user interaction to elements across every registered renderer: the
//! interaction gate, the pointer-to-element resolver, the source locator
//! walk, the file/line-to-element resolver, and the session context that
//! owns them all for one backend lifetime.

pub mod config;
pub mod events;
pub mod locator;
pub mod mode;
pub mod pointer;
pub mod session;

pub use config::SessionConfig;
pub use events::SessionEvent;
pub use mode::{HighlightMode, InteractionGate};
pub use pointer::{ClickEvent, EventDisposition, PointerResolver};
pub use session::{HighlightSession, SessionOptions};
