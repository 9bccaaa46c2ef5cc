//! Trailing-edge debouncing of async work.
//!
//! Each [`Debouncer::call`] replaces the pending work, so a burst of edits
//! produces one call once input has been quiet for the configured delay.
//! Work that has already started runs to completion even if a newer call
//! arrives.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period before debounced work fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `work` to run after the quiet period, dropping whatever was
    /// scheduled before and has not started yet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached: aborting the timer task no longer reaches the work.
            let running = tokio::spawn(work);
            let _ = running.await;
        }));
    }

    /// Drop pending work that has not started.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether work is scheduled or running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the pending work (quiet period included) to finish.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending.take()
            && let Err(err) = handle.await
            && !err.is_cancelled()
        {
            tracing::warn!(error = %err, "debounced task failed");
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};

    type Work = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Work) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let make = move |value: u32| {
            let sink = Arc::clone(&sink);
            Box::pin(async move {
                sink.lock().unwrap().push(value);
            }) as Work
        };
        (fired, make)
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_call_in_a_burst_fires() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(800));

        debouncer.call(make(1));
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.call(make(2));
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.call(make(3));
        assert!(debouncer.is_pending());

        debouncer.flush().await;
        assert_eq!(*fired.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_the_quiet_period() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(800));

        debouncer.call(make(1));
        tokio::time::sleep(Duration::from_millis(799)).await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        debouncer.flush().await;
        assert_eq!(*fired.lock().unwrap(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_calls_each_fire() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::default();

        debouncer.call(make(1));
        tokio::time::sleep(Duration::from_secs(1)).await;
        debouncer.call(make(2));
        debouncer.flush().await;
        assert_eq!(*fired.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn started_work_survives_a_newer_call() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let sink = Arc::clone(&fired);

        debouncer.call(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            sink.lock().unwrap().push(1);
        });
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.call(make(2));
        debouncer.flush().await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        let mut fired = fired.lock().unwrap().clone();
        fired.sort_unstable();
        assert_eq!(fired, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_work() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.call(make(1));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(!debouncer.is_pending());
    }
}
