//! Output module for presenting crawl results
//!
//! This module handles:
//! - Building a serializable report from a crawl result
//! - Printing a human-readable summary
//! - Exporting the report as JSON

mod report;

pub use report::{print_summary, CrawlReport};
