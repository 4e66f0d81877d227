//! Delayed tasks with handles
//!
//! Toast dismissal and the post-401 redirect run after a fixed delay.
//! Each one gets a handle so the host can cancel it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Run `task` once after `delay` on the current tokio runtime.
///
/// Panics when called outside a runtime, like `tokio::spawn`.
pub fn schedule<F>(delay: Duration, task: F) -> ScheduledTask
where
    F: FnOnce() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task();
    });

    ScheduledTask { handle }
}

#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Abort the task if it has not run yet. No effect afterwards.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Resolves to `true` when the task ran, `false` when it was cancelled.
/// Dropping a `ScheduledTask` without awaiting it leaves the task running.
impl Future for ScheduledTask {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.handle).poll(cx).map(|result| result.is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let task = schedule(Duration::from_millis(600), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(599)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        assert!(task.await);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_delay() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let task = schedule(Duration::from_millis(600), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        task.cancel();
        assert!(!task.await);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
