use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

struct DebounceState<T> {
    pending: Option<T>,
    timer: Option<JoinHandle<()>>,
}

/// Trailing-edge debounce around a single callback.
///
/// Every `schedule` replaces the stored arguments and re-arms the settling
/// window; the callback runs once, with the arguments of the last call, when
/// the window elapses without another call. Intermediate calls are discarded
/// entirely. At most one timer is armed at any moment.
pub struct Debouncer<T>
where
    T: Clone + Send + 'static,
{
    window: Duration,
    callback: Callback<T>,
    state: Arc<Mutex<DebounceState<T>>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(window: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            window,
            callback: Arc::new(callback),
            state: Arc::new(Mutex::new(DebounceState {
                pending: None,
                timer: None,
            })),
        }
    }

    /// Store `args` as the burst's survivor and (re)arm the settling window.
    pub fn schedule(&self, args: T) {
        let mut guard = self.state.lock();
        guard.pending = Some(args);
        if let Some(timer) = guard.timer.take() {
            timer.abort();
        }

        let state = Arc::clone(&self.state);
        let callback = Arc::clone(&self.callback);
        let window = self.window;
        guard.timer = Some(tokio::spawn(async move {
            sleep(window).await;
            let fired = {
                let mut guard = state.lock();
                guard.timer = None;
                guard.pending.take()
            };
            if let Some(args) = fired {
                callback(args);
            }
        }));
    }

    /// Drop the pending call, if any, without running it.
    pub fn cancel(&self) {
        let mut guard = self.state.lock();
        if let Some(timer) = guard.timer.take() {
            timer.abort();
        }
        guard.pending = None;
    }

    /// Run the pending call immediately instead of waiting out the window.
    pub fn flush(&self) {
        let fired = {
            let mut guard = self.state.lock();
            if let Some(timer) = guard.timer.take() {
                timer.abort();
            }
            guard.pending.take()
        };
        if let Some(args) = fired {
            (self.callback)(args);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }
}

impl<T> Drop for Debouncer<T>
where
    T: Clone + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(timer) = self.state.lock().timer.take() {
            timer.abort();
        }
    }
}
