//! Page fetching capability
//!
//! The crawler core only needs two things from the outside world: turn an
//! address into a document, and turn a document into outgoing addresses.
//! [`PageFetcher`] is that seam. [`HttpFetcher`] is the default
//! implementation backed by `reqwest` and `scraper`.

use crate::config::HttpConfig;
use crate::crawler::parser::parse_html;
use crate::{ExtractError, FetchError};
use reqwest::{header, redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Source of documents and their outgoing links
///
/// Implementations are shared by every worker of a crawler, so they must be
/// cheap to call concurrently. Timeouts, caching, and retries are the
/// implementation's business; the crawler records whatever error comes back.
pub trait PageFetcher: Send + Sync + 'static {
    /// A fetched document, handed from the fetch stage to the extract stage
    type Document: Send + 'static;

    /// Fetches the document at `address`
    fn fetch(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Self::Document, FetchError>> + Send;

    /// Lists the outgoing addresses of `document`
    ///
    /// The sequence is consumed lazily. Links yielded before an `Err` are
    /// kept; the crawler stops reading the document at the first error.
    fn extract_links<'a>(
        &'a self,
        document: &'a Self::Document,
    ) -> impl Iterator<Item = Result<String, ExtractError>> + 'a;
}

/// An HTML page fetched over HTTP
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects, used as the base for relative links
    pub url: Url,

    /// Page body
    pub body: String,
}

/// Builds an HTTP client with the configured identity and timeouts
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use strata::config::HttpConfig;
/// use strata::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let redirect = if config.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(config.max_redirects)
    };

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] that downloads HTML over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    type Document = Page;

    fn fetch(&self, address: &str) -> impl Future<Output = Result<Page, FetchError>> + Send {
        fetch_page(&self.client, address)
    }

    fn extract_links<'a>(
        &'a self,
        page: &'a Page,
    ) -> impl Iterator<Item = Result<String, ExtractError>> + 'a {
        let links: Vec<Result<String, ExtractError>> = match parse_html(&page.body, &page.url) {
            Ok(parsed) => parsed.links.into_iter().map(Ok).collect(),
            Err(message) => vec![Err(ExtractError {
                address: page.url.to_string(),
                message,
            })],
        };
        links.into_iter()
    }
}

/// Fetches one HTML page
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with `text/html` | `Ok(Page)` |
/// | 2xx, other content type | `ContentMismatch` |
/// | Non-2xx after redirects | `Status` |
/// | Timeout | `Timeout` |
/// | Connection failure | `Unreachable` |
/// | Body read failure | `Body` |
/// | Anything else | `Request` |
pub async fn fetch_page(client: &Client, address: &str) -> Result<Page, FetchError> {
    let response = client.get(address).send().await.map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(FetchError::ContentMismatch { content_type });
    }

    let url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?;

    Ok(Page { url, body })
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Unreachable(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}
