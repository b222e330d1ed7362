use crate::crawler::CrawlResult;
use crate::StrataError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializable, deterministically ordered view of a crawl result
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CrawlReport {
    /// Seed address the crawl started from
    pub seed: String,

    /// Number of levels requested
    pub depth: u32,

    /// Number of successfully fetched addresses
    pub downloaded_count: usize,

    /// Number of failed addresses
    pub error_count: usize,

    /// Successfully fetched addresses, sorted
    pub downloaded: Vec<String>,

    /// Failed addresses mapped to a printable reason, sorted by address
    pub errors: BTreeMap<String, String>,
}

impl CrawlReport {
    /// Builds a report from a crawl result
    pub fn new(seed: &str, depth: u32, result: &CrawlResult) -> Self {
        let mut downloaded = result.downloaded.clone();
        downloaded.sort();

        let errors: BTreeMap<String, String> = result
            .errors
            .iter()
            .map(|(address, error)| (address.clone(), error.to_string()))
            .collect();

        Self {
            seed: seed.to_string(),
            depth,
            downloaded_count: downloaded.len(),
            error_count: errors.len(),
            downloaded,
            errors,
        }
    }

    /// Renders the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, StrataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Prints a crawl report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_summary(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");

    println!("Seed: {}", report.seed);
    println!("Depth: {}", report.depth);
    println!();

    let total = report.downloaded_count + report.error_count;
    println!("Overview:");
    println!("  Addresses attempted: {}", total);
    println!("  Downloaded: {}", report.downloaded_count);
    println!("  Errors: {}", report.error_count);
    println!();

    if !report.downloaded.is_empty() {
        println!("Downloaded ({}):", report.downloaded.len());
        for address in &report.downloaded {
            println!("  - {}", address);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for (address, reason) in &report.errors {
            println!("  - {}: {}", address, reason);
        }
        println!();
    }

    let success_rate = if total > 0 {
        (report.downloaded.len() as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Success Rate: {:.1}% ({} / {} addresses downloaded)",
        success_rate,
        report.downloaded.len(),
        total
    );
}
