//! Integration tests for the crawler
//!
//! Most tests drive the crawler with an in-memory, instrumented fetcher so
//! that fetch counts and per-host concurrency can be observed exactly. The
//! last test runs a full HTTP crawl against a wiremock server.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strata::config::{CrawlerConfig, HttpConfig};
use strata::crawler::{CrawlResult, Crawler, HttpFetcher, PageFetcher};
use strata::{host_of, ExtractError, FetchError, PageError};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One entry of a fake page's link list; `None` marks an extraction failure
type Link = Option<String>;

#[derive(Debug, Clone)]
struct FakePage {
    outcome: Result<Vec<Link>, FetchError>,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct Stats {
    fetched: Vec<String>,
    active: HashMap<String, usize>,
    peak: HashMap<String, usize>,
}

/// In-memory web whose fetches are counted and whose per-host concurrency is tracked
#[derive(Debug, Default)]
struct FakeWeb {
    pages: HashMap<String, FakePage>,
    default_delay: Duration,
    stats: Mutex<Stats>,
}

#[derive(Debug)]
struct FakeDocument {
    links: Vec<Link>,
}

impl FakeWeb {
    fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            ..Self::default()
        }
    }

    fn page(mut self, address: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|l| Some(l.to_string())).collect();
        self.pages.insert(
            address.to_string(),
            FakePage {
                outcome: Ok(links),
                delay: None,
            },
        );
        self
    }

    fn page_with_broken_links(mut self, address: &str, before: &[&str], after: &[&str]) -> Self {
        let mut links: Vec<Link> = before.iter().map(|l| Some(l.to_string())).collect();
        links.push(None);
        links.extend(after.iter().map(|l| Some(l.to_string())));
        self.pages.insert(
            address.to_string(),
            FakePage {
                outcome: Ok(links),
                delay: None,
            },
        );
        self
    }

    fn failing(mut self, address: &str, error: FetchError) -> Self {
        self.pages.insert(
            address.to_string(),
            FakePage {
                outcome: Err(error),
                delay: None,
            },
        );
        self
    }

    fn slow(mut self, address: &str, delay: Duration) -> Self {
        if let Some(page) = self.pages.get_mut(address) {
            page.delay = Some(delay);
        }
        self
    }

    fn fetch_count(&self, address: &str) -> usize {
        self.stats
            .lock()
            .fetched
            .iter()
            .filter(|a| a.as_str() == address)
            .count()
    }

    fn total_fetches(&self) -> usize {
        self.stats.lock().fetched.len()
    }

    fn fetched(&self) -> HashSet<String> {
        self.stats.lock().fetched.iter().cloned().collect()
    }

    fn peak_for(&self, host: &str) -> usize {
        self.stats.lock().peak.get(host).copied().unwrap_or(0)
    }

    async fn fetch_page(&self, address: String) -> Result<FakeDocument, FetchError> {
        let host = host_of(&address).expect("crawler only fetches well-formed addresses");
        let page = self.pages.get(&address).cloned();

        {
            let mut stats = self.stats.lock();
            stats.fetched.push(address.clone());
            let active = stats.active.entry(host.clone()).or_insert(0);
            *active += 1;
            let now = *active;
            let peak = stats.peak.entry(host.clone()).or_insert(0);
            *peak = (*peak).max(now);
        }

        let delay = page
            .as_ref()
            .and_then(|p| p.delay)
            .unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        {
            let mut stats = self.stats.lock();
            if let Some(active) = stats.active.get_mut(&host) {
                *active -= 1;
            }
        }

        match page {
            Some(FakePage {
                outcome: Ok(links), ..
            }) => Ok(FakeDocument { links }),
            Some(FakePage {
                outcome: Err(error),
                ..
            }) => Err(error),
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}

/// Handle given to the crawler; the test keeps its own `Arc` to read the stats
#[derive(Debug, Clone)]
struct Web(Arc<FakeWeb>);

impl PageFetcher for Web {
    type Document = FakeDocument;

    fn fetch(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<FakeDocument, FetchError>> + Send {
        let web = Arc::clone(&self.0);
        let address = address.to_string();
        async move { web.fetch_page(address).await }
    }

    fn extract_links<'a>(
        &'a self,
        document: &'a FakeDocument,
    ) -> impl Iterator<Item = Result<String, ExtractError>> + 'a {
        document.links.iter().map(|link| match link {
            Some(address) => Ok(address.clone()),
            None => Err(ExtractError {
                address: "fake".to_string(),
                message: "broken markup".to_string(),
            }),
        })
    }
}

fn config(downloaders: usize, extractors: usize, per_host: usize) -> CrawlerConfig {
    CrawlerConfig {
        downloaders,
        extractors,
        per_host,
        shutdown_grace_secs: 1,
    }
}

fn crawler(web: &Arc<FakeWeb>, config: CrawlerConfig) -> Crawler<Web> {
    Crawler::new(Web(Arc::clone(web)), &config).expect("inside a tokio runtime")
}

/// Every address ends in exactly one of the two outcomes, at most once
fn assert_consistent(result: &CrawlResult) {
    let downloaded: HashSet<_> = result.downloaded.iter().collect();
    assert_eq!(
        downloaded.len(),
        result.downloaded.len(),
        "an address was recorded as downloaded twice"
    );
    for address in result.errors.keys() {
        assert!(
            !downloaded.contains(address),
            "{} is both downloaded and in error",
            address
        );
    }
}

fn downloaded_set(result: &CrawlResult) -> HashSet<&str> {
    result.downloaded.iter().map(String::as_str).collect()
}

const A: &str = "https://a.example/";
const B: &str = "https://b.example/";
const C: &str = "https://c.example/";
const D: &str = "https://d.example/";

fn scenario_web() -> Arc<FakeWeb> {
    Arc::new(
        FakeWeb::new(Duration::from_millis(5))
            .page(A, &[B, C])
            .page(B, &[A, D])
            .failing(C, FetchError::Unreachable("connection refused".to_string()))
            .page(D, &[]),
    )
}

#[tokio::test]
async fn test_scenario_depth_two() {
    let web = scenario_web();
    let crawler = crawler(&web, config(4, 4, 2));

    let result = crawler.crawl(A, 2).await;

    assert_consistent(&result);
    assert_eq!(downloaded_set(&result), HashSet::from([A, B]));
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.error_for(C),
        Some(PageError::Fetch(FetchError::Unreachable(_)))
    ));
    // D is only reachable at level three
    assert_eq!(web.fetch_count(D), 0);
    assert_eq!(web.fetch_count(A), 1);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_scenario_depth_three_reaches_d_and_never_refetches_seed() {
    let web = scenario_web();
    let crawler = crawler(&web, config(4, 4, 2));

    let result = crawler.crawl(A, 3).await;

    assert_consistent(&result);
    assert_eq!(downloaded_set(&result), HashSet::from([A, B, D]));
    assert!(result.error_for(C).is_some());
    assert_eq!(web.fetch_count(A), 1);
    assert_eq!(web.fetch_count(D), 1);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_depth_one_fetches_only_the_seed() {
    let web = scenario_web();
    let crawler = crawler(&web, config(4, 4, 2));

    let result = crawler.crawl(A, 1).await;

    assert_eq!(result.downloaded, vec![A.to_string()]);
    assert!(result.errors.is_empty());
    assert_eq!(web.total_fetches(), 1);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_depth_zero_crawls_nothing() {
    let web = scenario_web();
    let crawler = crawler(&web, config(2, 2, 2));

    let result = crawler.crawl(A, 0).await;

    assert!(result.is_empty());
    assert_eq!(web.total_fetches(), 0);
}

#[tokio::test]
async fn test_duplicate_links_are_fetched_once() {
    let seed = "https://site.example/";
    let page = "https://site.example/page";
    let web = Arc::new(
        FakeWeb::new(Duration::from_millis(1))
            .page(seed, &[page, page, seed, page])
            .page(page, &[seed]),
    );
    let crawler = crawler(&web, config(4, 4, 4));

    let result = crawler.crawl(seed, 4).await;

    assert_consistent(&result);
    assert_eq!(result.downloaded.len(), 2);
    assert_eq!(web.fetch_count(seed), 1);
    assert_eq!(web.fetch_count(page), 1);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_same_link_from_many_pages_is_fetched_once() {
    let seed = "https://hub.example/";
    let shared = "https://shared.example/";
    let spokes: Vec<String> = (0..10)
        .map(|i| format!("https://spoke{}.example/", i))
        .collect();
    let spoke_refs: Vec<&str> = spokes.iter().map(String::as_str).collect();

    let mut web = FakeWeb::new(Duration::from_millis(2)).page(seed, &spoke_refs);
    for spoke in &spoke_refs {
        web = web.page(spoke, &[shared, seed]);
    }
    let web = Arc::new(web.page(shared, &[]));
    let crawler = crawler(&web, config(8, 8, 2));

    let result = crawler.crawl(seed, 3).await;

    assert_consistent(&result);
    assert_eq!(result.downloaded.len(), 12);
    assert_eq!(web.fetch_count(shared), 1);
    assert_eq!(web.fetch_count(seed), 1);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_per_host_limit_of_one_serializes_fetches() {
    let seed = "https://one.example/";
    let pages: Vec<String> = (0..12)
        .map(|i| format!("https://one.example/p{}", i))
        .collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();

    let mut web = FakeWeb::new(Duration::from_millis(5)).page(seed, &page_refs);
    for page in &page_refs {
        web = web.page(page, &[]);
    }
    let web = Arc::new(web);
    let crawler = crawler(&web, config(8, 4, 1));

    let result = crawler.crawl(seed, 2).await;

    assert_eq!(result.downloaded.len(), 13);
    assert_eq!(web.peak_for("one.example"), 1);

    let gate = crawler.host_gate("one.example").expect("gate created");
    assert_eq!(gate.in_flight(), 0);
    assert_eq!(gate.queued(), 0);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_per_host_limit_bounds_each_host_independently() {
    let seed = "https://root.example/";
    let mut links = Vec::new();
    for host in ["x.example", "y.example"] {
        for i in 0..10 {
            links.push(format!("https://{}/p{}", host, i));
        }
    }
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();

    let mut web = FakeWeb::new(Duration::from_millis(10)).page(seed, &link_refs);
    for link in &link_refs {
        web = web.page(link, &[]);
    }
    let web = Arc::new(web);
    let crawler = crawler(&web, config(16, 4, 3));

    let result = crawler.crawl(seed, 2).await;

    assert_eq!(result.downloaded.len(), 21);
    assert!(web.peak_for("x.example") <= 3);
    assert!(web.peak_for("y.example") <= 3);
    assert!(web.peak_for("x.example") >= 1);
    assert_eq!(crawler.host_count(), 3);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_crawls_share_host_limit() {
    let seeds: Vec<String> = (0..4)
        .map(|i| format!("https://shared-host.example/seed{}", i))
        .collect();
    let mut web = FakeWeb::new(Duration::from_millis(10));
    for (i, seed) in seeds.iter().enumerate() {
        let child = format!("https://shared-host.example/child{}", i);
        web = web.page(seed, &[child.as_str()]).page(&child, &[]);
    }
    let web = Arc::new(web);
    let crawler = Arc::new(crawler(&web, config(8, 4, 1)));

    let mut handles = Vec::new();
    for seed in seeds {
        let crawler = Arc::clone(&crawler);
        handles.push(tokio::spawn(async move { crawler.crawl(&seed, 2).await }));
    }
    for handle in handles {
        let result = handle.await.unwrap();
        assert_consistent(&result);
        assert_eq!(result.downloaded.len(), 2);
    }

    assert_eq!(web.peak_for("shared-host.example"), 1);
    assert_eq!(crawler.host_count(), 1);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_malformed_links_are_errors_and_never_fetched() {
    let seed = "https://good.example/";
    let web = Arc::new(
        FakeWeb::new(Duration::from_millis(1))
            .page(seed, &["not a url", "mailto:someone@good.example"]),
    );
    let crawler = crawler(&web, config(2, 2, 2));

    let result = crawler.crawl(seed, 2).await;

    assert_consistent(&result);
    assert_eq!(result.downloaded, vec![seed.to_string()]);
    assert!(matches!(
        result.error_for("not a url"),
        Some(PageError::MalformedAddress(_))
    ));
    assert!(matches!(
        result.error_for("mailto:someone@good.example"),
        Some(PageError::MalformedAddress(_))
    ));
    assert_eq!(web.total_fetches(), 1);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_malformed_seed_is_reported() {
    let web = Arc::new(FakeWeb::new(Duration::from_millis(1)));
    let crawler = crawler(&web, config(1, 1, 1));

    let result = crawler.crawl("::nonsense::", 3).await;

    assert!(result.downloaded.is_empty());
    assert!(matches!(
        result.error_for("::nonsense::"),
        Some(PageError::MalformedAddress(_))
    ));
    assert_eq!(web.total_fetches(), 0);
}

#[tokio::test]
async fn test_extraction_failure_keeps_earlier_links() {
    let seed = "https://parse.example/";
    let before = "https://parse.example/before";
    let after = "https://parse.example/after";
    let web = Arc::new(
        FakeWeb::new(Duration::from_millis(1))
            .page_with_broken_links(seed, &[before], &[after])
            .page(before, &[])
            .page(after, &[]),
    );
    let crawler = crawler(&web, config(2, 2, 2));

    let result = crawler.crawl(seed, 3).await;

    assert_consistent(&result);
    assert!(result.is_downloaded(seed));
    assert!(result.is_downloaded(before));
    assert!(!result.is_downloaded(after));
    assert!(result.errors.is_empty());
    assert_eq!(web.fetch_count(after), 0);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_missing_page_is_a_fetch_error() {
    let seed = "https://gone.example/";
    let web = Arc::new(FakeWeb::new(Duration::from_millis(1)));
    let crawler = crawler(&web, config(1, 1, 1));

    let result = crawler.crawl(seed, 2).await;

    assert_eq!(
        result.error_for(seed),
        Some(&PageError::Fetch(FetchError::Status { status: 404 }))
    );
    assert!(result.downloaded.is_empty());
}

#[tokio::test]
async fn test_cancellation_returns_partial_result() {
    let seed = "https://cancel.example/";
    let fast = "https://cancel.example/fast";
    let slow = "https://cancel.example/slow";
    let web = Arc::new(
        FakeWeb::new(Duration::from_millis(5))
            .page(seed, &[fast, slow])
            .page(fast, &[])
            .page(slow, &["https://cancel.example/never"])
            .slow(slow, Duration::from_secs(10)),
    );
    let crawler = crawler(&web, config(4, 4, 4));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let result = crawler.crawl_with_cancellation(seed, 5, cancel).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_consistent(&result);
    assert!(result.is_downloaded(seed));
    assert!(result.is_downloaded(fast));
    assert!(!result.is_downloaded(slow));
    assert!(result.error_for(slow).is_none());
    assert_eq!(web.fetch_count("https://cancel.example/never"), 0);
}

#[tokio::test]
async fn test_cancelled_before_start_fetches_nothing() {
    let web = scenario_web();
    let crawler = crawler(&web, config(2, 2, 2));

    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = crawler.crawl_with_cancellation(A, 3, cancel).await;

    assert!(result.is_empty());
    assert_eq!(web.total_fetches(), 0);
}

#[tokio::test]
async fn test_shutdown_twice_is_noop_and_blocks_new_crawls() {
    let web = scenario_web();
    let crawler = crawler(&web, config(2, 2, 2));

    let first = crawler.crawl(A, 2).await;
    assert!(!first.is_empty());
    let fetches_before = web.total_fetches();

    crawler.shutdown().await;
    assert!(crawler.is_shut_down());
    tokio::time::timeout(Duration::from_millis(100), crawler.shutdown())
        .await
        .expect("second shutdown returns immediately");

    let after = crawler.crawl(A, 2).await;
    assert!(after.is_empty());
    assert_eq!(web.total_fetches(), fetches_before);
}

#[tokio::test]
async fn test_shutdown_mid_crawl_drops_queued_fetches() {
    let seed = "https://queue.example/";
    let pages: Vec<String> = (0..10)
        .map(|i| format!("https://queue.example/p{}", i))
        .collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();

    let mut web = FakeWeb::new(Duration::from_millis(100)).page(seed, &page_refs);
    for page in &page_refs {
        web = web.page(page, &[]);
    }
    let web = Arc::new(web.slow(seed, Duration::from_millis(1)));
    let crawler = Arc::new(crawler(&web, config(4, 2, 1)));

    let running = {
        let crawler = Arc::clone(&crawler);
        tokio::spawn(async move { crawler.crawl(seed, 2).await })
    };

    tokio::time::sleep(Duration::from_millis(150)).await;
    crawler.shutdown().await;
    let fetches_at_shutdown = web.total_fetches();

    let result = tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("crawl finishes after shutdown")
        .unwrap();

    assert_consistent(&result);
    assert!(fetches_at_shutdown < 11);
    assert!(result.errors.is_empty());

    let fetched = web.fetched();
    for address in &result.downloaded {
        assert!(fetched.contains(address));
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(web.total_fetches(), fetches_at_shutdown);

    let gate = crawler.host_gate("queue.example").expect("gate created");
    assert_eq!(gate.queued(), 0);
    assert_eq!(gate.in_flight(), 0);
}

#[tokio::test]
async fn test_wide_graph_outcomes_are_consistent() {
    let mut web = FakeWeb::new(Duration::from_millis(1));
    let address = |i: usize| format!("https://host{}.example/page{}", i % 5, i);

    for i in 0..60 {
        let targets = [address((i * 7 + 1) % 60), address((i * 3 + 2) % 60), address(i)];
        let target_refs: Vec<&str> = targets.iter().map(String::as_str).collect();
        web = if i % 9 == 4 {
            web.failing(&address(i), FetchError::Status { status: 500 })
        } else {
            web.page(&address(i), &target_refs)
        };
    }
    let web = Arc::new(web);
    let crawler = crawler(&web, config(6, 3, 2));

    let result = crawler.crawl(&address(0), 6).await;

    assert_consistent(&result);
    let fetched = web.fetched();
    assert_eq!(fetched.len(), web.total_fetches(), "some address was fetched twice");
    assert_eq!(
        result.downloaded.len() + result.errors.len(),
        fetched.len()
    );
    for host in 0..5 {
        assert!(web.peak_for(&format!("host{}.example", host)) <= 2);
    }

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_http_crawl_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();

    let html = |body: String| {
        ResponseTemplate::new(200).set_body_raw(body, "text/html")
    };

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body><a href="{0}/a">A</a><a href="/b">B</a></body></html>"#,
            base
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(
            r#"<html><body><a href="/">home</a><a href="/c#top">C</a></body></html>"#.to_string(),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html("<html><body>leaf</body></html>".to_string()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
    let crawler = Crawler::new(fetcher, &config(4, 2, 2)).unwrap();

    let seed = format!("{}/", base);
    let result = crawler.crawl(&seed, 3).await;

    assert_consistent(&result);
    let downloaded = downloaded_set(&result);
    assert_eq!(downloaded.len(), 3);
    assert!(downloaded.contains(seed.as_str()));
    assert!(downloaded.contains(format!("{}/a", base).as_str()));
    assert!(downloaded.contains(format!("{}/c", base).as_str()));
    assert_eq!(
        result.error_for(&format!("{}/b", base)),
        Some(&PageError::Fetch(FetchError::Status { status: 500 }))
    );

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_one_shot_crawl_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                r#"<a href="/next">next</a><a href="mailto:x@y.z">mail</a>"#,
                "text/html",
            ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
        )
        .mount(&server)
        .await;

    let config =
        strata::config::parse_config("[crawler]\ndownloaders = 2\nper-host = 1\n").unwrap();
    let seed = format!("{}/", server.uri());
    let result = strata::crawler::crawl(&config, &seed, 2).await.unwrap();

    assert_eq!(result.downloaded, vec![seed]);
    assert!(matches!(
        result.error_for(&format!("{}/next", server.uri())),
        Some(PageError::Fetch(FetchError::ContentMismatch { .. }))
    ));
    // mailto links are not followed by the HTML parser at all
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test]
async fn test_dropped_crawl_skips_its_queued_fetches() {
    let seed = "https://abandon.example/";
    let pages: Vec<String> = (0..6)
        .map(|i| format!("https://abandon.example/p{}", i))
        .collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();

    let mut web = FakeWeb::new(Duration::from_millis(200)).page(seed, &page_refs);
    for page in &page_refs {
        web = web.page(page, &[]);
    }
    let web = Arc::new(web.slow(seed, Duration::from_millis(1)));
    let crawler = crawler(&web, config(4, 2, 1));

    let abandoned =
        tokio::time::timeout(Duration::from_millis(300), crawler.crawl(seed, 2)).await;
    assert!(abandoned.is_err());

    // Let whatever was already fetching finish, then give the gate time to drain its queue
    tokio::time::sleep(Duration::from_millis(1200)).await;

    assert!(web.total_fetches() <= 3);
    let gate = crawler.host_gate("abandon.example").expect("gate created");
    assert_eq!(gate.queued(), 0);
    assert_eq!(gate.in_flight(), 0);

    crawler.shutdown().await;
}

#[tokio::test]
async fn test_finished_crawl_leaves_caller_token_untouched() {
    let web = scenario_web();
    let crawler = crawler(&web, config(2, 2, 2));

    let cancel = CancellationToken::new();
    let result = crawler.crawl_with_cancellation(A, 2, cancel.clone()).await;

    assert!(!result.is_empty());
    assert!(!cancel.is_cancelled());

    crawler.shutdown().await;
}
