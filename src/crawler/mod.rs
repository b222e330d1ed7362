//! Crawler module: the breadth-first crawl engine
//!
//! This module contains the core crawling logic, including:
//! - Per-host admission control
//! - Fetch and extract worker pools
//! - Level-by-level crawl sessions
//! - The HTTP fetcher and HTML link extraction used by default

mod barrier;
mod extract_stage;
mod fetch_stage;
mod fetcher;
mod host_gate;
mod parser;
mod pool;
mod session;
mod web_crawler;

pub use barrier::{CompletionToken, LevelBarrier};
pub use fetch_stage::FetchJob;
pub use fetcher::{build_http_client, fetch_page, HttpFetcher, Page, PageFetcher};
pub use host_gate::{Admission, HostGate, HostGates};
pub use parser::{parse_html, ParsedPage};
pub use pool::WorkerPool;
pub use session::CrawlResult;
pub use web_crawler::Crawler;

use crate::config::Config;
use crate::StrataError;

/// Runs one HTTP crawl with the given configuration
///
/// Builds an [`HttpFetcher`] and a [`Crawler`], crawls from `seed` to
/// `depth`, then shuts the crawler down.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - Absolute URL to start from
/// * `depth` - Number of levels, the seed being level 1
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl finished
/// * `Err(StrataError)` - The HTTP client or crawler could not be built
pub async fn crawl(config: &Config, seed: &str, depth: u32) -> Result<CrawlResult, StrataError> {
    let fetcher = HttpFetcher::new(&config.http)?;
    let crawler = Crawler::new(fetcher, &config.crawler)?;
    let result = crawler.crawl(seed, depth).await;
    crawler.shutdown().await;
    Ok(result)
}
