//! Configuration module for Strata
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section and key is optional; missing values fall back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use strata::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("strata.toml")).unwrap();
//! println!("Fetch workers: {}", config.crawler.downloaders);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig};

// Re-export parser and validation entry points
pub use parser::{load_config, parse_config};
pub use validation::validate;
