use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use spotlight_core_types::NodeHandle;

/// Host-drawn highlight visualization. The kernel never computes geometry or
/// paints; it only tells the overlay what to cover.
pub trait Overlay: Send + Sync {
    fn inspect(&self, elements: &[NodeHandle], label: Option<&str>);
    fn remove(&self);
}

/// Viewport change that invalidates the current highlight projection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewportEvent {
    Resized,
    Scrolled,
}

/// Paintable environment supplied by the host: an overlay factory plus a
/// stream of viewport changes to re-project against.
pub trait PaintSurface: Send + Sync {
    fn create_overlay(&self) -> Arc<dyn Overlay>;
    fn viewport_events(&self) -> broadcast::Receiver<ViewportEvent>;
}

/// The one seam the rest of the kernel highlights through.
///
/// `show` with an empty element list is a strict no-op: it must never clear
/// or alter an existing highlight. `hide` is always idempotent.
#[async_trait]
pub trait HighlightSink: Send + Sync {
    async fn show(&self, elements: &[NodeHandle], label: Option<&str>, auto_hide: bool);
    async fn hide(&self);
}
