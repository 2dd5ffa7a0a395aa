//! Configuration module for Site-Tally
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; the command line can override the crawl limits.
//!
//! # Example
//!
//! ```no_run
//! use site_tally::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tally.toml")).unwrap();
//! println!("Crawler will fetch at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT,
};
pub use validation::MAX_CONCURRENCY_LIMIT;

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
