use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

struct ThrottleState<T> {
    latest: Option<T>,
    timer: Option<JoinHandle<()>>,
}

/// Rate limiter with the leading edge suppressed.
///
/// The first `schedule` of a burst opens the window; further calls inside the
/// window only replace the stored arguments. When the window elapses the
/// callback fires once, with the newest arguments. Nothing ever fires on the
/// very first call of a burst; the initial event of a pointer gesture is
/// usually unintentional.
pub struct Throttler<T>
where
    T: Clone + Send + 'static,
{
    window: Duration,
    callback: Callback<T>,
    state: Arc<Mutex<ThrottleState<T>>>,
}

impl<T> Throttler<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(window: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            window,
            callback: Arc::new(callback),
            state: Arc::new(Mutex::new(ThrottleState {
                latest: None,
                timer: None,
            })),
        }
    }

    /// Record `args` for the current window, opening one if none is active.
    pub fn schedule(&self, args: T) {
        let mut guard = self.state.lock();
        guard.latest = Some(args);
        if guard.timer.is_some() {
            return;
        }

        let state = Arc::clone(&self.state);
        let callback = Arc::clone(&self.callback);
        let window = self.window;
        guard.timer = Some(tokio::spawn(async move {
            sleep(window).await;
            let fired = {
                let mut guard = state.lock();
                guard.timer = None;
                guard.latest.take()
            };
            if let Some(args) = fired {
                callback(args);
            }
        }));
    }

    /// Close the window and drop whatever it was holding.
    pub fn cancel(&self) {
        let mut guard = self.state.lock();
        if let Some(timer) = guard.timer.take() {
            timer.abort();
        }
        guard.latest = None;
    }

    /// Fire the held call now and close the window.
    pub fn flush(&self) {
        let fired = {
            let mut guard = self.state.lock();
            if let Some(timer) = guard.timer.take() {
                timer.abort();
            }
            guard.latest.take()
        };
        if let Some(args) = fired {
            (self.callback)(args);
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().timer.is_some()
    }
}

impl<T> Drop for Throttler<T>
where
    T: Clone + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(timer) = self.state.lock().timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync) {
        let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |v| sink.lock().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn leading_edge_is_suppressed() {
        let (seen, sink) = recorder();
        let throttler = Throttler::new(Duration::from_millis(200), sink);

        throttler.schedule(1);
        tokio::task::yield_now().await;
        assert!(seen.lock().is_empty());

        sleep(Duration::from_millis(250)).await;
        assert_eq!(*seen.lock(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_newest_args() {
        let (seen, sink) = recorder();
        let throttler = Throttler::new(Duration::from_millis(200), sink);

        for v in 1..=5 {
            throttler.schedule(v);
            sleep(Duration::from_millis(10)).await;
        }

        sleep(Duration::from_millis(250)).await;
        assert_eq!(*seen.lock(), vec![5]);
    }

    #[tokio::test(start_paused = true)]
    async fn next_burst_opens_a_fresh_window() {
        let (seen, sink) = recorder();
        let throttler = Throttler::new(Duration::from_millis(200), sink);

        throttler.schedule(1);
        sleep(Duration::from_millis(250)).await;
        throttler.schedule(2);
        sleep(Duration::from_millis(250)).await;

        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_closes_the_window_silently() {
        let (seen, sink) = recorder();
        let throttler = Throttler::new(Duration::from_millis(200), sink);

        throttler.schedule(1);
        throttler.cancel();
        assert!(!throttler.is_open());

        sleep(Duration::from_millis(400)).await;
        assert!(seen.lock().is_empty());
    }
}
