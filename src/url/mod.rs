//! URL handling module for Site-Tally
//!
//! This module provides the deduplication key (`CrawlUrl`) and the origin check
//! that confines a crawl to the seed's site.

mod normalize;
mod origin;

// Re-export main types
pub use normalize::{normalize_url, CrawlUrl};
pub use origin::SiteScope;
