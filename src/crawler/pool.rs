//! Fixed-size worker pool on top of the tokio runtime
//!
//! Jobs are spawned as tracked tasks but only run while holding one of the
//! pool's permits, so at most `size` jobs execute at once. Shutdown is a two
//! step protocol: [`WorkerPool::close`] rejects new jobs, then
//! [`WorkerPool::drain`] waits a bounded grace period and cancels whatever is
//! still pending or running.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Bounded pool of workers executing submitted futures
#[derive(Debug)]
pub struct WorkerPool {
    name: &'static str,
    permits: Arc<Semaphore>,
    tracker: TaskTracker,
    cancel: CancellationToken,
    closed: AtomicBool,
    handle: Handle,
}

impl WorkerPool {
    /// Creates a pool of `size` workers spawning onto `handle`
    pub fn new(name: &'static str, size: usize, handle: Handle) -> Self {
        Self {
            name,
            permits: Arc::new(Semaphore::new(size.max(1))),
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
            closed: AtomicBool::new(false),
            handle,
        }
    }

    /// Number of submitted jobs that have not finished yet
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Submits a job
    ///
    /// Returns `false` if the pool is closed; the job is dropped without
    /// being polled. A job cancelled by [`drain`](Self::drain) is dropped at
    /// its current await point.
    pub fn submit<F>(&self, job: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_closed() {
            return false;
        }

        let permits = Arc::clone(&self.permits);
        let cancel = self.cancel.clone();
        self.tracker.spawn_on(
            async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {}
                    _ = async move {
                        if let Ok(_permit) = permits.acquire_owned().await {
                            job.await;
                        }
                    } => {}
                }
            },
            &self.handle,
        );
        true
    }

    /// Stops accepting jobs; returns `false` if the pool was already closed
    pub fn close(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        self.tracker.close();
        first
    }

    /// Closes the pool and cancels every accepted job without waiting
    pub fn abort(&self) {
        self.close();
        self.cancel.cancel();
    }

    /// Waits for accepted jobs to finish, cancelling them after `grace`
    ///
    /// Returns `true` if every job completed within the grace period.
    pub async fn drain(&self, grace: Duration) -> bool {
        if tokio::time::timeout(grace, self.tracker.wait()).await.is_ok() {
            tracing::debug!("{} pool drained", self.name);
            return true;
        }

        tracing::warn!(
            "{} pool still has {} jobs after {:?}, cancelling",
            self.name,
            self.tracker.len(),
            grace
        );
        self.cancel.cancel();

        if tokio::time::timeout(grace, self.tracker.wait()).await.is_err() {
            tracing::error!("{} pool did not terminate after cancellation", self.name);
        }
        false
    }
}
