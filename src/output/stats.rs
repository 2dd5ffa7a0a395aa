//! Crawl statistics and console summary
//!
//! This module computes totals over a finished visitation map and prints the
//! per-page visit counts.

use crate::state::PageMap;
use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Distinct pages recorded
    pub total_pages: usize,

    /// Pages fetched and extracted
    pub pages_extracted: usize,

    /// Pages whose fetch failed
    pub pages_failed: usize,

    /// Sum of visit counts over all pages
    pub total_visits: u64,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl finished
    pub finished_at: DateTime<Utc>,

    /// Pages by visit count, most visited first, ties by URL
    pub visits: Vec<(String, u32)>,
}

impl CrawlStatistics {
    /// Computes statistics for a finished crawl
    pub fn from_pages(pages: &PageMap, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        let pages_extracted = pages.values().filter(|r| r.outcome.is_success()).count();

        let mut visits: Vec<(String, u32)> = pages
            .iter()
            .map(|(key, record)| (key.to_string(), record.visits))
            .collect();
        visits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_pages: pages.len(),
            pages_extracted,
            pages_failed: pages.len() - pages_extracted,
            total_visits: pages.values().map(|r| u64::from(r.visits)).sum(),
            started_at,
            finished_at,
            visits,
        }
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.pages_extracted as f64 / self.total_pages as f64) * 100.0
    }
}

/// Prints statistics to stdout, one line per crawled page with its visit count
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("Crawled {} pages.", stats.total_pages);
    println!("Internal links:");
    for (url, visits) in &stats.visits {
        println!("{}: {}", url, visits);
    }

    println!();
    println!(
        "Extracted: {}, failed: {} ({:.1}% success), total visits: {}, took {:.2}s",
        stats.pages_extracted,
        stats.pages_failed,
        stats.success_rate(),
        stats.total_visits,
        stats.duration_seconds()
    );
}
