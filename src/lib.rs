//! Site-Tally: a single-site concurrent crawler
//!
//! This crate crawls one website from a seed URL, stays within the seed's origin,
//! extracts a heading, a leading paragraph, links and images from every page, and
//! tallies how many times each normalized URL was encountered.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
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

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Errors returned by a page fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Http { status: u16 },

    #[error("Expected text/html, got '{content_type}'")]
    ContentType { content_type: String },

    #[error("Network error: {0}")]
    Network(String),
}

/// Errors returned by page extraction
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid base URL '{0}'")]
    InvalidBase(String),
}

/// Result type alias for Site-Tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, crawl_with_fetcher};
pub use state::{PageMap, PageOutcome, PageRecord};
pub use url::{normalize_url, CrawlUrl};
