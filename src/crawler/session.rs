//! Breadth-first driver for a single crawl
//!
//! A [`CrawlSession`] lives exactly as long as one `crawl` call. It walks the
//! frontier one level at a time: every address of the level is dispatched
//! through its host gate, then the driver waits on the level barrier before
//! the addresses discovered during the level become the next frontier.

use crate::crawler::barrier::LevelBarrier;
use crate::crawler::fetch_stage::{FetchJob, FetchStage};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::host_gate::HostGates;
use crate::url::host_of;
use crate::PageError;
use dashmap::DashSet;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Outcome of a crawl: every address reached ends up in exactly one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlResult {
    /// Addresses fetched successfully, in completion order
    pub downloaded: Vec<String>,

    /// Addresses that could not be fetched, with the reason
    pub errors: HashMap<String, PageError>,
}

impl CrawlResult {
    pub fn is_downloaded(&self, address: &str) -> bool {
        self.downloaded.iter().any(|a| a == address)
    }

    pub fn error_for(&self, address: &str) -> Option<&PageError> {
        self.errors.get(address)
    }

    pub fn is_empty(&self) -> bool {
        self.downloaded.is_empty() && self.errors.is_empty()
    }
}

/// State shared between the driver and the workers of one crawl
#[derive(Debug)]
pub(crate) struct SessionState {
    visited: DashSet<String>,
    next_frontier: Mutex<Vec<String>>,
    outcome: Mutex<CrawlResult>,
    cancel: CancellationToken,
}

impl SessionState {
    pub(crate) fn new(seed: &str, cancel: CancellationToken) -> Self {
        let visited = DashSet::new();
        visited.insert(seed.to_string());
        Self {
            visited,
            next_frontier: Mutex::new(Vec::new()),
            outcome: Mutex::new(CrawlResult::default()),
            cancel,
        }
    }

    /// Marks `address` visited and queues it for the next level
    ///
    /// Returns `false` if the address had already been visited, in which
    /// case nothing is queued.
    pub(crate) fn discover(&self, address: String) -> bool {
        if !self.visited.insert(address.clone()) {
            return false;
        }
        self.next_frontier.lock().push(address);
        true
    }

    pub(crate) fn record_downloaded(&self, address: &str) {
        self.outcome.lock().downloaded.push(address.to_string());
    }

    pub(crate) fn record_error(&self, address: &str, error: PageError) {
        self.outcome
            .lock()
            .errors
            .insert(address.to_string(), error);
    }

    pub(crate) fn take_next_frontier(&self) -> Vec<String> {
        std::mem::take(&mut *self.next_frontier.lock())
    }

    pub(crate) fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn snapshot(&self) -> CrawlResult {
        self.outcome.lock().clone()
    }
}

/// One `crawl(seed, depth)` call
pub(crate) struct CrawlSession<'c, F: PageFetcher> {
    fetch: &'c Arc<FetchStage<F>>,
    hosts: &'c HostGates<FetchJob>,
    state: Arc<SessionState>,
    seed: String,
    depth: u32,
}

impl<'c, F: PageFetcher> CrawlSession<'c, F> {
    pub(crate) fn new(
        fetch: &'c Arc<FetchStage<F>>,
        hosts: &'c HostGates<FetchJob>,
        seed: &str,
        depth: u32,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            fetch,
            hosts,
            state: Arc::new(SessionState::new(seed, cancel.child_token())),
            seed: seed.to_string(),
            depth,
        }
    }

    /// Runs every level and returns the accumulated result
    ///
    /// If the session's token is cancelled while a level is in progress, the
    /// remaining levels are abandoned and the result so far is returned.
    /// Dropping the returned future cancels the session as well, so its queued
    /// work is skipped instead of running for nobody.
    pub(crate) async fn run(self) -> CrawlResult {
        let _abandon_on_drop = self.state.cancel.clone().drop_guard();
        let mut frontier = vec![self.seed.clone()];

        for level in 1..=self.depth {
            if frontier.is_empty() {
                tracing::debug!("Frontier empty before level {}, crawl complete", level);
                break;
            }
            if self.state.is_cancelled() {
                tracing::info!("Crawl cancelled before level {}", level);
                break;
            }

            // The last level only fetches; its links would lead past the depth limit
            let extract = level < self.depth;
            let barrier = LevelBarrier::new();

            tracing::info!(
                "Level {}/{}: {} addresses, {} visited",
                level,
                self.depth,
                frontier.len(),
                self.state.visited_count()
            );

            for address in frontier.drain(..) {
                self.dispatch(address, extract, &barrier);
            }

            tokio::select! {
                biased;
                _ = barrier.wait() => {}
                _ = self.state.cancel.cancelled() => {
                    tracing::info!(
                        "Crawl cancelled at level {} with {} tasks outstanding",
                        level,
                        barrier.pending()
                    );
                    break;
                }
            }

            frontier = self.state.take_next_frontier();
        }

        self.state.snapshot()
    }

    fn dispatch(&self, address: String, extract: bool, barrier: &LevelBarrier) {
        match host_of(&address) {
            Ok(host) => {
                let gate = self.hosts.gate_for(&host);
                let job = FetchJob::new(address, extract, Arc::clone(&self.state), barrier.token());
                self.fetch.schedule(gate, job);
            }
            Err(e) => {
                tracing::debug!("Skipping malformed address {}: {}", address, e);
                self.state
                    .record_error(&address, PageError::MalformedAddress(e));
            }
        }
    }
}
