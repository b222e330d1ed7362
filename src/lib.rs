//! Strata: a bounded-depth, per-host throttled web crawler
//!
//! This crate crawls breadth-first from a seed address up to a fixed depth,
//! running fetches and link extraction on two bounded worker pools while
//! never exceeding a configured number of in-flight fetches per host.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Strata operations
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Crawler must be created inside a tokio runtime")]
    NoRuntime,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Address-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Failure of the fetch capability for one address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Expected HTML, got {content_type}")]
    ContentMismatch { content_type: String },

    #[error("Failed to read body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Failure while pulling links out of a fetched document
///
/// Extraction failures are absorbed by the crawler and never reach a result.
#[derive(Debug, Clone, Error)]
#[error("Failed to extract links from {address}: {message}")]
pub struct ExtractError {
    pub address: String,
    pub message: String,
}

/// Reason an address ended up in a crawl's error map
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Malformed address: {0}")]
    MalformedAddress(#[from] UrlError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Result type alias for Strata operations
pub type Result<T> = std::result::Result<T, StrataError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlResult, Crawler, HttpFetcher, PageFetcher};
pub use url::host_of;
