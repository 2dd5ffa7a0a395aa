//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageRecord`: extracted data and visit count for one normalized URL
//! - `CrawlState`: the shared map, reservations, stop flag and page budget

mod crawl_state;
mod page_record;

// Re-export main types
pub use crawl_state::{Admission, CrawlState};
pub use page_record::{PageMap, PageOutcome, PageRecord};
