//! Concurrency limiter for page fetches
//!
//! Bounds how many fetches are in flight at once. Closing the limiter wakes
//! every task still waiting for a slot so it can abandon its fetch.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Semaphore-backed limiter shared by all crawl tasks
#[derive(Debug, Clone)]
pub struct FetchLimiter {
    permits: Arc<Semaphore>,
}

impl FetchLimiter {
    /// Creates a limiter admitting `max_concurrency` fetches; zero is clamped to 1
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// Waits for a free slot
    ///
    /// Returns `None` if the limiter is closed, either before or while waiting.
    /// The slot is released when the returned permit is dropped.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        self.permits.clone().acquire_owned().await.ok()
    }

    /// Refuses all further acquisitions; permits already handed out stay valid
    pub fn close(&self) {
        self.permits.close();
    }

    #[cfg(test)]
    fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    #[cfg(test)]
    fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
