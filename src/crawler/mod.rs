//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML parsing and page data extraction
//! - Bounding concurrent fetches
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod limiter;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_html, Fetcher, HttpFetcher};
pub use limiter::FetchLimiter;
pub use parser::{extract_page_data, PageData};

use crate::config::Config;
use crate::state::PageMap;
use std::sync::Arc;
use std::time::Duration;

/// Crawls a site over HTTP with the default user agent
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build an HTTP client identifying itself as `BootCrawler/1.0`
/// 2. Crawl every same-origin page reachable from `seed`
/// 3. Return the visitation map once no work remains
///
/// # Arguments
///
/// * `seed` - Absolute URL to start from
/// * `max_concurrency` - Fetches in flight at once (clamped to >= 1)
/// * `max_pages` - Page budget (clamped to >= 1)
///
/// # Returns
///
/// * `Ok(PageMap)` - Crawl completed; failures are recorded inside the map
/// * `Err(TallyError)` - Malformed seed URL or HTTP client setup failure
pub async fn crawl(seed: &str, max_concurrency: usize, max_pages: usize) -> crate::Result<PageMap> {
    let mut config = Config::default();
    config.crawler.max_concurrency = max_concurrency;
    config.crawler.max_pages = max_pages;
    crawl_with_config(seed, &config).await
}

/// Crawls a site over HTTP using limits, user agent and timeout from `config`
pub async fn crawl_with_config(seed: &str, config: &Config) -> crate::Result<PageMap> {
    let timeout = match config.crawler.request_timeout {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let fetcher = HttpFetcher::from_config(&config.user_agent, timeout)?;

    crawl_with_fetcher(
        seed,
        Arc::new(fetcher),
        config.crawler.max_concurrency,
        config.crawler.max_pages,
    )
    .await
}

/// Crawls a site with a caller-supplied fetcher
pub async fn crawl_with_fetcher(
    seed: &str,
    fetcher: Arc<dyn Fetcher>,
    max_concurrency: usize,
    max_pages: usize,
) -> crate::Result<PageMap> {
    Ok(run_crawl(seed, fetcher, max_concurrency, max_pages).await?)
}
