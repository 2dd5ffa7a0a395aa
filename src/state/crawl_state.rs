//! Shared visitation map for one crawl invocation
//!
//! Every read and write of the map and the stop flag goes through one of the
//! whole-step operations below; the coordinator holds the state behind a single
//! mutex, so each call is atomic with respect to other crawl tasks.

use crate::state::page_record::{PageMap, PageRecord};
use crate::url::CrawlUrl;
use std::collections::HashMap;

/// Result of asking to crawl a normalized URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The caller owns this key and must fetch it
    Admitted,

    /// The key was already recorded or reserved; its visit count was bumped
    Revisited,

    /// Every free budget slot is held by an unfinished page; the key is dropped
    /// but the crawl goes on
    Full,

    /// The stop flag was already set
    Stopped,

    /// This call found the map at its budget and set the stop flag
    BudgetReached,
}

/// The visitation map, its reservations, the stop flag and the page budget
#[derive(Debug)]
pub struct CrawlState {
    /// Fully resolved pages
    pages: PageMap,

    /// Keys admitted but not yet recorded, with visits seen so far
    reserved: HashMap<CrawlUrl, u32>,

    /// Set once, never cleared
    stopped: bool,

    max_pages: usize,
}

impl CrawlState {
    /// Creates an empty state; a zero budget is clamped to 1
    pub fn new(max_pages: usize) -> Self {
        Self {
            pages: HashMap::new(),
            reserved: HashMap::new(),
            stopped: false,
            max_pages: max_pages.max(1),
        }
    }

    /// Decides whether the caller may fetch `key`
    ///
    /// Checked in order: stop flag, recorded pages against the budget, known key
    /// (recorded or reserved), free budget slots. Only a full map sets the stop
    /// flag. Reserved keys hold a slot, so the map can never grow past
    /// `max_pages`, and a key refused with [`Admission::Full`] leaves the
    /// reserved pages free to finish.
    pub fn admit(&mut self, key: &CrawlUrl) -> Admission {
        if self.stopped {
            return Admission::Stopped;
        }

        if self.pages.len() >= self.max_pages {
            self.stopped = true;
            return Admission::BudgetReached;
        }

        if let Some(record) = self.pages.get_mut(key) {
            record.visits += 1;
            return Admission::Revisited;
        }

        if let Some(visits) = self.reserved.get_mut(key) {
            *visits += 1;
            return Admission::Revisited;
        }

        if self.pages.len() + self.reserved.len() >= self.max_pages {
            return Admission::Full;
        }

        self.reserved.insert(key.clone(), 1);
        Admission::Admitted
    }

    /// Turns the reservation for `key` into a record
    ///
    /// Visits counted while the key was reserved carry over. Returns false and
    /// drops the reservation if the stop flag was set in the meantime.
    pub fn record(&mut self, key: CrawlUrl, mut record: PageRecord) -> bool {
        let visits = self.reserved.remove(&key).unwrap_or(1);

        if self.stopped {
            return false;
        }

        if let Some(existing) = self.pages.get_mut(&key) {
            existing.visits += visits;
            return true;
        }

        record.visits = visits;
        self.pages.insert(key, record);
        true
    }

    /// Drops the reservation of a task that gave up before fetching
    pub fn release(&mut self, key: &CrawlUrl) {
        self.reserved.remove(key);
    }

    /// Returns true once the budget has been hit
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Consumes the state and returns the recorded pages
    pub fn into_pages(self) -> PageMap {
        self.pages
    }
}
