//! Strata main entry point
//!
//! This is the command-line interface for the Strata crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use strata::config::{load_config, validate, Config};
use strata::crawler::{Crawler, HttpFetcher};
use strata::output::{print_summary, CrawlReport};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Strata: a bounded-depth, per-host throttled web crawler
///
/// Crawls breadth-first from URL for DEPTH levels (the URL itself is level
/// one), with DOWNLOADERS fetch workers, EXTRACTORS link extraction workers,
/// and at most PER_HOST simultaneous fetches against any single host.
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version)]
#[command(about = "A bounded-depth, per-host throttled web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Number of levels to crawl
    #[arg(value_name = "DEPTH", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// Number of fetch workers (overrides config)
    #[arg(value_name = "DOWNLOADERS")]
    downloaders: Option<usize>,

    /// Number of link extraction workers (overrides config)
    #[arg(value_name = "EXTRACTORS")]
    extractors: Option<usize>,

    /// Maximum simultaneous fetches per host (overrides config)
    #[arg(value_name = "PER_HOST")]
    per_host: Option<usize>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    tracing::debug!("Using configuration: {:?}", config);

    let fetcher = HttpFetcher::new(&config.http).context("Failed to build HTTP client")?;
    let crawler = Crawler::new(fetcher, &config.crawler)?;

    // Ctrl-C ends the crawl early but still reports what finished
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, returning partial results");
            on_interrupt.cancel();
        }
    });

    let result = crawler
        .crawl_with_cancellation(&cli.url, cli.depth, cancel)
        .await;
    crawler.shutdown().await;

    let report = CrawlReport::new(&cli.url, cli.depth, &result);
    if cli.json {
        println!("{}", report.to_json()?);
    } else if !cli.quiet {
        print_summary(&report);
    }

    Ok(())
}

/// Loads the config file if given, then applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(downloaders) = cli.downloaders {
        config.crawler.downloaders = downloaders;
    }
    if let Some(extractors) = cli.extractors {
        config.crawler.extractors = extractors;
    }
    if let Some(per_host) = cli.per_host {
        config.crawler.per_host = per_host;
    }

    validate(&config).context("Invalid crawler arguments")?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("strata=info,warn"),
            1 => EnvFilter::new("strata=debug,info"),
            2 => EnvFilter::new("strata=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
