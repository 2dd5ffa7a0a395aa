//! Output module for crawl reports
//!
//! This module handles:
//! - Writing the CSV page report
//! - Computing crawl statistics and printing the console summary

mod csv_report;
pub mod stats;

pub use csv_report::{write_csv, write_csv_report, LIST_DELIMITER, REPORT_HEADERS};
pub use stats::{print_statistics, CrawlStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
