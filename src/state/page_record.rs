//! Per-page records kept in the crawl map

use crate::crawler::PageData;
use crate::url::CrawlUrl;
use crate::FetchError;
use std::collections::HashMap;
use std::fmt;

/// Final crawl result: normalized key to record
pub type PageMap = HashMap<CrawlUrl, PageRecord>;

/// How a recorded page was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page was fetched and its data extracted
    Extracted,

    /// Fetch failed; the record carries empty fields
    FetchFailed(FetchError),
}

impl PageOutcome {
    /// Returns true if the page was fetched and extracted
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted)
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extracted => write!(f, "extracted"),
            Self::FetchFailed(e) => write!(f, "failed ({})", e),
        }
    }
}

/// One entry per distinct normalized URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// The first URL string that produced this record (not the normalized key)
    pub url: String,

    /// Text of the page's first-level heading
    pub title: String,

    /// Text of the page's leading paragraph
    pub first_paragraph: String,

    /// Outgoing links in document order, origin-unfiltered
    pub outgoing_links: Vec<String>,

    /// Image URLs in document order
    pub image_urls: Vec<String>,

    /// Encounter count, starting at 1
    pub visits: u32,

    /// Whether the page was extracted or its fetch failed
    pub outcome: PageOutcome,
}

impl PageRecord {
    /// Builds a record for a successfully extracted page
    pub fn extracted(url: impl Into<String>, data: PageData) -> Self {
        Self {
            url: url.into(),
            title: data.title,
            first_paragraph: data.first_paragraph,
            outgoing_links: data.links,
            image_urls: data.images,
            visits: 1,
            outcome: PageOutcome::Extracted,
        }
    }

    /// Builds an empty record for a page whose fetch failed
    pub fn failed(url: impl Into<String>, error: FetchError) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            first_paragraph: String::new(),
            outgoing_links: Vec::new(),
            image_urls: Vec::new(),
            visits: 1,
            outcome: PageOutcome::FetchFailed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_record() {
        let data = PageData {
            title: "Title".to_string(),
            first_paragraph: "Para".to_string(),
            links: vec!["https://example.com/a".to_string()],
            images: vec!["https://example.com/i.png".to_string()],
        };
        let record = PageRecord::extracted("https://example.com/", data);

        assert_eq!(record.url, "https://example.com/");
        assert_eq!(record.title, "Title");
        assert_eq!(record.outgoing_links.len(), 1);
        assert_eq!(record.image_urls.len(), 1);
        assert_eq!(record.visits, 1);
        assert!(record.outcome.is_success());
    }

    #[test]
    fn test_failed_record_is_empty() {
        let record = PageRecord::failed("https://example.com/a", FetchError::Http { status: 404 });

        assert!(record.title.is_empty());
        assert!(record.first_paragraph.is_empty());
        assert!(record.outgoing_links.is_empty());
        assert!(record.image_urls.is_empty());
        assert_eq!(record.visits, 1);
        assert!(!record.outcome.is_success());
        assert_eq!(record.outcome.to_string(), "failed (HTTP status 404)");
    }
}
