//! Overlay lifecycle for the highlight kernel.
//!
//! The kernel drives an on-screen highlight it does not draw itself: the
//! [`Overlay`] and [`PaintSurface`] traits are implemented by the embedding
//! host, and the kernel owns only the lifecycle around them: lazy creation,
//! auto-hide, viewport re-projection, teardown.
//!
//! Hosts without a paintable surface (headless or native embeddings) get the
//! same [`HighlightSink`] seam backed by bridge notifications instead; the
//! variant is chosen once at session construction, never per call.

pub mod api;
pub mod native;
pub mod visual;

pub use api::{HighlightSink, Overlay, PaintSurface, ViewportEvent};
pub use native::NativeNotificationSink;
pub use visual::VisualSink;
