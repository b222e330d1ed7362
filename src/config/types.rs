use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Strata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Worker pool and admission control configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Number of workers performing fetches
    pub downloaders: usize,

    /// Number of workers extracting links from fetched pages
    pub extractors: usize,

    /// Maximum number of simultaneous fetches against one host
    pub per_host: usize,

    /// How long each pool may drain on shutdown before remaining tasks are cancelled
    pub shutdown_grace_secs: u64,
}

impl CrawlerConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            downloaders: 10,
            extractors: 10,
            per_host: 10,
            shutdown_grace_secs: 10,
        }
    }
}

/// HTTP client configuration for the default fetcher
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed per request
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("strata/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}
