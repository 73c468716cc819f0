//! Trailing-edge debounce
//!
//! Each trigger cancels the pending one and restarts the window, so a
//! burst of triggers runs the task once, after the last of them.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Default debounce window
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(100);

pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `task` after the window, replacing anything pending.
    ///
    /// Outside a tokio runtime there is nothing to wait on, so the task
    /// runs immediately.
    pub fn trigger<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let Ok(handle) = Handle::try_current() else {
            task();
            return;
        };

        let window = self.window;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(window).await;
            task();
        }));
    }

    /// Drop pending work without running it
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Wait for pending work to run
    pub async fn settle(&mut self) {
        if let Some(pending) = self.pending.take() {
            // A cancelled task is as settled as a finished one
            let _ = pending.await;
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
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
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let shared = count.clone();
        let make = move || {
            let c = shared.clone();
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once() {
        let (count, task) = counter();
        let mut debouncer = Debouncer::default();

        for _ in 0..5 {
            debouncer.trigger(task());
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        debouncer.settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_window() {
        let (count, task) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.trigger(task());
        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_discard_work() {
        let (count, task) = counter();

        let mut debouncer = Debouncer::default();
        debouncer.trigger(task());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        let mut dropped = Debouncer::default();
        dropped.trigger(task());
        drop(dropped);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_runs_inline_without_runtime() {
        let (count, task) = counter();
        let mut debouncer = Debouncer::default();
        debouncer.trigger(task());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }
}
