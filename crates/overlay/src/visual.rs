use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use spotlight_core_types::NodeHandle;

use crate::api::{HighlightSink, Overlay, PaintSurface};

/// Reference auto-hide delay; sessions may configure their own.
pub const DEFAULT_SHOW_DURATION: Duration = Duration::from_millis(2000);

struct SinkState {
    overlay: Option<Arc<dyn Overlay>>,
    auto_hide: Option<JoinHandle<()>>,
    reprojection: Option<JoinHandle<()>>,
}

/// Overlay lifecycle state machine for paintable hosts.
///
/// Holds at most one overlay, one armed auto-hide timer, and one viewport
/// re-projection task at any time; `auto_hide` and `reprojection` are live
/// only while the overlay is. A new `show` supersedes both before arming its
/// own.
pub struct VisualSink {
    surface: Arc<dyn PaintSurface>,
    show_duration: Duration,
    state: Arc<Mutex<SinkState>>,
}

impl VisualSink {
    pub fn new(surface: Arc<dyn PaintSurface>, show_duration: Duration) -> Self {
        Self {
            surface,
            show_duration,
            state: Arc::new(Mutex::new(SinkState {
                overlay: None,
                auto_hide: None,
                reprojection: None,
            })),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().overlay.is_some()
    }
}

fn hide_now(state: &Mutex<SinkState>) {
    let (timer, handler, overlay) = {
        let mut guard = state.lock();
        (
            guard.auto_hide.take(),
            guard.reprojection.take(),
            guard.overlay.take(),
        )
    };
    if let Some(timer) = timer {
        timer.abort();
    }
    if let Some(handler) = handler {
        handler.abort();
    }
    if let Some(overlay) = overlay {
        debug!("highlight overlay removed");
        overlay.remove();
    }
}

#[async_trait]
impl HighlightSink for VisualSink {
    async fn show(&self, elements: &[NodeHandle], label: Option<&str>, auto_hide: bool) {
        // An empty request must leave an existing highlight untouched,
        // including its pending auto-hide.
        if elements.is_empty() {
            return;
        }

        let overlay = {
            let mut guard = self.state.lock();

            if let Some(timer) = guard.auto_hide.take() {
                timer.abort();
            }

            let overlay = match &guard.overlay {
                Some(existing) => Arc::clone(existing),
                None => {
                    let created = self.surface.create_overlay();
                    guard.overlay = Some(Arc::clone(&created));
                    created
                }
            };

            // Exactly one re-projection task: replace, never stack.
            if let Some(handler) = guard.reprojection.take() {
                handler.abort();
            }
            let mut events = self.surface.viewport_events();
            let projected = Arc::clone(&overlay);
            let kept_elements = elements.to_vec();
            let kept_label = label.map(str::to_owned);
            guard.reprojection = Some(tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(_) => projected.inspect(&kept_elements, kept_label.as_deref()),
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
            }));

            if auto_hide {
                let state = Arc::clone(&self.state);
                let delay = self.show_duration;
                guard.auto_hide = Some(tokio::spawn(async move {
                    sleep(delay).await;
                    hide_now(&state);
                }));
            }

            overlay
        };

        overlay.inspect(elements, label);
    }

    async fn hide(&self) {
        hide_now(&self.state);
    }
}

impl Drop for VisualSink {
    fn drop(&mut self) {
        let mut guard = self.state.lock();
        if let Some(timer) = guard.auto_hide.take() {
            timer.abort();
        }
        if let Some(handler) = guard.reprojection.take() {
            handler.abort();
        }
    }
}
