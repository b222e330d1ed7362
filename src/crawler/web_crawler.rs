//! Crawler facade
//!
//! Owns the two worker pools and the host gate registry. Every `crawl` call
//! runs its own session on top of these shared resources, so a host's fetch
//! cap holds across sessions running at the same time.

use crate::config::CrawlerConfig;
use crate::crawler::extract_stage::ExtractStage;
use crate::crawler::fetch_stage::{FetchJob, FetchStage};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::host_gate::{HostGate, HostGates};
use crate::crawler::pool::WorkerPool;
use crate::crawler::session::{CrawlResult, CrawlSession};
use crate::StrataError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Breadth-first crawler with per-host admission control
///
/// # Example
///
/// ```no_run
/// use strata::config::{CrawlerConfig, HttpConfig};
/// use strata::crawler::{Crawler, HttpFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(&HttpConfig::default())?;
/// let crawler = Crawler::new(fetcher, &CrawlerConfig::default())?;
///
/// let result = crawler.crawl("https://example.com/", 2).await;
/// println!("{} pages downloaded", result.downloaded.len());
///
/// crawler.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct Crawler<F: PageFetcher> {
    fetch: Arc<FetchStage<F>>,
    extract: Arc<ExtractStage<F>>,
    hosts: HostGates<FetchJob>,
    grace: Duration,
    shut_down: AtomicBool,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler on the current tokio runtime
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Pools sized from `config`
    /// * `Err(StrataError::NoRuntime)` - Called outside a tokio runtime
    pub fn new(fetcher: F, config: &CrawlerConfig) -> Result<Self, StrataError> {
        let handle = Handle::try_current().map_err(|_| StrataError::NoRuntime)?;
        Ok(Self::with_handle(fetcher, config, handle))
    }

    /// Creates a crawler whose workers run on `handle`
    pub fn with_handle(fetcher: F, config: &CrawlerConfig, handle: Handle) -> Self {
        let fetcher = Arc::new(fetcher);
        let extract = Arc::new(ExtractStage::new(
            WorkerPool::new("extract", config.extractors, handle.clone()),
            Arc::clone(&fetcher),
        ));
        let fetch = Arc::new(FetchStage::new(
            WorkerPool::new("fetch", config.downloaders, handle),
            fetcher,
            Arc::clone(&extract),
        ));

        tracing::debug!(
            "Crawler ready: {} downloaders, {} extractors, {} per host",
            config.downloaders,
            config.extractors,
            config.per_host
        );

        Self {
            fetch,
            extract,
            hosts: HostGates::new(config.per_host),
            grace: config.shutdown_grace(),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Crawls breadth-first from `seed` through `depth` levels
    ///
    /// Level 1 is the seed itself. A depth of 0 crawls nothing.
    pub async fn crawl(&self, seed: &str, depth: u32) -> CrawlResult {
        self.crawl_with_cancellation(seed, depth, CancellationToken::new())
            .await
    }

    /// Like [`crawl`](Self::crawl), but stops early when `cancel` fires
    ///
    /// A cancelled crawl returns what had finished by then; pending work of
    /// the session is skipped.
    pub async fn crawl_with_cancellation(
        &self,
        seed: &str,
        depth: u32,
        cancel: CancellationToken,
    ) -> CrawlResult {
        if self.is_shut_down() {
            tracing::warn!("Crawler is shut down, not crawling {}", seed);
            return CrawlResult::default();
        }
        if depth == 0 {
            return CrawlResult::default();
        }

        tracing::info!("Starting crawl of {} to depth {}", seed, depth);
        let start_time = Instant::now();

        let result = CrawlSession::new(&self.fetch, &self.hosts, seed, depth, cancel)
            .run()
            .await;

        tracing::info!(
            "Crawl of {} finished: {} downloaded, {} errors in {:?}",
            seed,
            result.downloaded.len(),
            result.errors.len(),
            start_time.elapsed()
        );
        result
    }

    /// Stops the crawler
    ///
    /// New work is refused from now on. Both pools get the configured grace
    /// period to finish, after which remaining tasks are cancelled. Fetches
    /// still queued on a host gate are dropped without being reported.
    /// Calling this again is a no-op.
    pub async fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            tracing::debug!("Crawler already shut down");
            return;
        }

        tracing::info!("Shutting down crawler");
        self.fetch.pool().close();
        self.extract.pool().close();

        let fetch_drained = self.fetch.pool().drain(self.grace).await;
        let extract_drained = self.extract.pool().drain(self.grace).await;

        if fetch_drained && extract_drained {
            tracing::info!("Crawler shut down cleanly");
        } else {
            tracing::warn!("Crawler shut down with cancelled tasks");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    /// Gate for `host`, if any crawl has touched that host
    pub fn host_gate(&self, host: &str) -> Option<Arc<HostGate<FetchJob>>> {
        self.hosts.get(host)
    }

    /// Number of distinct hosts seen across all crawls
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

impl<F: PageFetcher> Drop for Crawler<F> {
    fn drop(&mut self) {
        if !self.is_shut_down() {
            self.fetch.pool().abort();
            self.extract.pool().abort();
        }
    }
}
