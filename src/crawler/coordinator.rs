//! Crawler coordinator - main crawl orchestration logic
//!
//! One crawl task is spawned per discovered link. Each task:
//! 1. Drops URLs outside the seed's origin
//! 2. Asks the shared state for admission (atomic check-and-reserve)
//! 3. Waits for a fetch slot and fetches the page
//! 4. Re-checks the stop flag, extracts, and records the page
//! 5. Spawns a child task per outgoing link and waits for all of them
//!
//! A task is complete only when its whole subtree is, so awaiting the seed task
//! awaits the entire crawl. The stop flag is advisory: tasks already past their
//! last check run to completion.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::limiter::FetchLimiter;
use crate::crawler::parser::{extract_page_data, PageData};
use crate::state::{Admission, CrawlState, PageMap, PageRecord};
use crate::url::{normalize_url, CrawlUrl, SiteScope};
use crate::UrlError;
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinSet;

/// Main crawler coordinator structure
pub struct Coordinator {
    seed: String,
    scope: SiteScope,
    state: Mutex<CrawlState>,
    limiter: FetchLimiter,
    fetcher: Arc<dyn Fetcher>,
}

impl Coordinator {
    /// Creates a new coordinator for one crawl
    ///
    /// # Arguments
    ///
    /// * `seed` - Absolute HTTP(S) URL to start from; also fixes the crawl origin
    /// * `fetcher` - Retrieves page HTML
    /// * `max_concurrency` - Fetches allowed in flight at once (clamped to >= 1)
    /// * `max_pages` - Page budget (clamped to >= 1)
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(UrlError)` - The seed is not an absolute HTTP(S) URL
    pub fn new(
        seed: &str,
        fetcher: Arc<dyn Fetcher>,
        max_concurrency: usize,
        max_pages: usize,
    ) -> Result<Self, UrlError> {
        let scope = SiteScope::from_seed(seed)?;
        normalize_url(seed)?;

        Ok(Self {
            seed: seed.trim().to_string(),
            scope,
            state: Mutex::new(CrawlState::new(max_pages)),
            limiter: FetchLimiter::new(max_concurrency),
            fetcher,
        })
    }

    /// Runs the crawl to completion and returns the visitation map
    ///
    /// Never fails: fetch and extraction problems end up as empty records or
    /// log lines.
    pub async fn run(self: Arc<Self>) -> PageMap {
        tracing::info!(
            "Starting crawl of {} (origin {})",
            self.seed,
            self.scope.as_string()
        );

        Arc::clone(&self).visit(self.seed.clone()).await;

        let pages = {
            let mut state = self.lock_state();
            std::mem::replace(&mut *state, CrawlState::new(1)).into_pages()
        };

        tracing::info!("Crawl finished: {} pages recorded", pages.len());
        pages
    }

    /// Crawls one URL and, transitively, everything it links to
    fn visit(self: Arc<Self>, url: String) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            if !self.scope.contains(&url) {
                tracing::trace!("Skipping {} (outside crawl origin)", url);
                return;
            }

            let key = match normalize_url(&url) {
                Ok(key) => key,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", url, e);
                    return;
                }
            };

            let admission = self.lock_state().admit(&key);
            match admission {
                Admission::Admitted => {}
                Admission::Revisited => {
                    tracing::trace!("Revisit of {}", key);
                    return;
                }
                Admission::Full => {
                    tracing::trace!("Skipping {}: remaining budget already claimed", key);
                    return;
                }
                Admission::Stopped => return,
                Admission::BudgetReached => {
                    tracing::info!("Reached maximum number of pages to crawl");
                    self.limiter.close();
                    return;
                }
            }

            let Some(data) = self.fetch_and_extract(&url, &key).await else {
                return;
            };

            let links = data.links.clone();
            let recorded = self
                .lock_state()
                .record(key.clone(), PageRecord::extracted(&url, data));
            if !recorded {
                tracing::debug!("Dropping {}: crawl stopped during fetch", key);
                return;
            }

            self.fan_out(links).await;
        })
    }

    /// Fetches an admitted URL under the limiter and extracts its data
    ///
    /// Returns `None` when there is nothing to expand: the task abandoned because
    /// the crawl stopped, or the fetch failed (in which case an empty record has
    /// already been stored).
    async fn fetch_and_extract(&self, url: &str, key: &CrawlUrl) -> Option<PageData> {
        let Some(permit) = self.limiter.acquire().await else {
            self.lock_state().release(key);
            return None;
        };

        if self.abandon_if_stopped(key) {
            return None;
        }

        tracing::debug!("Getting html for {}", url);
        let result = self.fetcher.fetch(url).await;
        drop(permit);

        let html = match result {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                self.lock_state()
                    .record(key.clone(), PageRecord::failed(url, e));
                return None;
            }
        };

        if self.abandon_if_stopped(key) {
            return None;
        }

        match extract_page_data(&html, url) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Failed to extract {}: {}", url, e);
                Some(PageData::default())
            }
        }
    }

    /// Spawns a crawl task per link and waits for every one of them
    async fn fan_out(self: &Arc<Self>, links: Vec<String>) {
        let mut children = JoinSet::new();
        for link in links {
            children.spawn(Arc::clone(self).visit(link));
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Crawl task failed: {}", e);
            }
        }
    }

    /// Releases the reservation for `key` if the crawl has stopped
    fn abandon_if_stopped(&self, key: &CrawlUrl) -> bool {
        let mut state = self.lock_state();
        if state.is_stopped() {
            state.release(key);
            true
        } else {
            false
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CrawlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs a crawl with the given fetcher
///
/// # Arguments
///
/// * `seed` - Absolute URL to start from
/// * `fetcher` - Retrieves page HTML
/// * `max_concurrency` - Fetches in flight at once (clamped to >= 1)
/// * `max_pages` - Page budget (clamped to >= 1)
///
/// # Returns
///
/// * `Ok(PageMap)` - Every recorded page, keyed by normalized URL
/// * `Err(UrlError)` - The seed URL is malformed
///
/// # Example
///
/// ```no_run
/// use site_tally::crawler::{run_crawl, HttpFetcher};
/// use site_tally::config::UserAgentConfig;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = Arc::new(HttpFetcher::from_config(&UserAgentConfig::default(), None)?);
/// let pages = run_crawl("https://example.com/", fetcher, 3, 25).await?;
/// println!("{} pages", pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    seed: &str,
    fetcher: Arc<dyn Fetcher>,
    max_concurrency: usize,
    max_pages: usize,
) -> Result<PageMap, UrlError> {
    let coordinator = Arc::new(Coordinator::new(seed, fetcher, max_concurrency, max_pages)?);
    Ok(coordinator.run().await)
}
