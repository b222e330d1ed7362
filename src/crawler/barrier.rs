//! Level barrier for the breadth-first driver
//!
//! Each unit of work dispatched for a level holds a [`CompletionToken`].
//! Dropping the token is the unit's single arrival at the barrier, so the
//! count stays exact whether the work succeeded, failed, was rejected by a
//! closed pool, or was cancelled mid-flight.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct BarrierInner {
    pending: AtomicUsize,
    notify: Notify,
}

/// Count-down barrier for one breadth-first level
#[derive(Debug, Clone, Default)]
pub struct LevelBarrier {
    inner: Arc<BarrierInner>,
}

impl LevelBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more outstanding unit of work
    pub fn token(&self) -> CompletionToken {
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
        CompletionToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of tokens not yet dropped
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Waits until every token handed out so far has been dropped
    ///
    /// Returns immediately if nothing is outstanding.
    pub async fn wait(&self) {
        loop {
            if self.pending() == 0 {
                return;
            }
            // A stored permit from an earlier zero crossing only causes a re-check
            self.inner.notify.notified().await;
        }
    }
}

/// One outstanding unit of work; arrives at the barrier when dropped
#[derive(Debug)]
#[must_use = "dropping the token immediately marks the work as finished"]
pub struct CompletionToken {
    inner: Arc<BarrierInner>,
}

impl Drop for CompletionToken {
    fn drop(&mut self) {
        if self.inner.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.notify.notify_one();
        }
    }
}
