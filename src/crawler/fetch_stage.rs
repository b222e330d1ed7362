//! Fetch stage: bounded pool of downloaders behind per-host gates
//!
//! A fetch is started only once its host's gate admits it. When the fetch
//! ends, however it ends, the gate slot is released exactly once through
//! [`GateRelease`], which may immediately start the next fetch queued on the
//! same host.

use crate::crawler::barrier::CompletionToken;
use crate::crawler::extract_stage::ExtractStage;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::host_gate::{Admission, HostGate};
use crate::crawler::pool::WorkerPool;
use crate::crawler::session::SessionState;
use crate::PageError;
use std::sync::Arc;

/// One address waiting for, or holding, a fetch slot on its host
#[derive(Debug)]
pub struct FetchJob {
    address: String,
    extract: bool,
    session: Arc<SessionState>,
    token: CompletionToken,
}

impl FetchJob {
    pub(crate) fn new(
        address: String,
        extract: bool,
        session: Arc<SessionState>,
        token: CompletionToken,
    ) -> Self {
        Self {
            address,
            extract,
            session,
            token,
        }
    }
}

type Gate = Arc<HostGate<FetchJob>>;

pub(crate) struct FetchStage<F: PageFetcher> {
    pool: WorkerPool,
    fetcher: Arc<F>,
    extract: Arc<ExtractStage<F>>,
}

impl<F: PageFetcher> FetchStage<F> {
    pub(crate) fn new(pool: WorkerPool, fetcher: Arc<F>, extract: Arc<ExtractStage<F>>) -> Self {
        Self {
            pool,
            fetcher,
            extract,
        }
    }

    pub(crate) fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Routes `job` through its host's gate, starting it if a slot is free
    pub(crate) fn schedule(self: &Arc<Self>, gate: Gate, job: FetchJob) {
        if let Admission::Run(job) = gate.submit(job) {
            if let Err(dropped) = self.start(Arc::clone(&gate), job) {
                tracing::debug!("Fetch pool closed, dropping fetch of {}", dropped.address);
                drop(dropped);
                self.release(&gate);
            }
        }
    }

    /// Hands an admitted job to the pool; gives it back if the pool is closed
    fn start(self: &Arc<Self>, gate: Gate, job: FetchJob) -> Result<(), FetchJob> {
        if self.pool.is_closed() {
            return Err(job);
        }

        let release = GateRelease {
            stage: Arc::clone(self),
            gate,
        };
        let stage = Arc::clone(self);

        // A rejection racing with shutdown drops the future, which still runs `release`
        self.pool.submit(async move {
            let document = stage.fetch(&job).await;
            drop(release);

            if let Some(document) = document {
                if job.extract {
                    stage.extract.submit(document, job.session, job.token);
                }
            }
        });
        Ok(())
    }

    /// Gives up a slot on `gate`, starting the next queued job if any
    ///
    /// Queued jobs that can no longer start because the pool is closed are
    /// dropped here, one after another, without being fetched.
    fn release(self: &Arc<Self>, gate: &Gate) {
        while let Some(next) = gate.finish() {
            match self.start(Arc::clone(gate), next) {
                Ok(()) => return,
                Err(dropped) => {
                    tracing::debug!(
                        "Fetch pool closed, dropping queued fetch of {}",
                        dropped.address
                    );
                }
            }
        }
    }

    /// Fetches one address and records the outcome on its session
    async fn fetch(&self, job: &FetchJob) -> Option<F::Document> {
        if job.session.is_cancelled() {
            return None;
        }

        match self.fetcher.fetch(&job.address).await {
            Ok(document) => {
                tracing::debug!("Downloaded {}", job.address);
                job.session.record_downloaded(&job.address);
                Some(document)
            }
            Err(e) => {
                tracing::debug!("Failed to fetch {}: {}", job.address, e);
                job.session
                    .record_error(&job.address, PageError::Fetch(e));
                None
            }
        }
    }
}

/// Releases a host slot when dropped
struct GateRelease<F: PageFetcher> {
    stage: Arc<FetchStage<F>>,
    gate: Gate,
}

impl<F: PageFetcher> Drop for GateRelease<F> {
    fn drop(&mut self) {
        self.stage.release(&self.gate);
    }
}
