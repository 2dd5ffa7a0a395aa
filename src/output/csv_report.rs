//! CSV page report
//!
//! One header row, then one row per recorded page, ordered by normalized URL.
//! Link and image lists are joined with `;`; the writer quotes any field holding
//! a comma, a quote or a newline.

use crate::output::OutputResult;
use crate::state::{PageMap, PageRecord};
use std::io;
use std::path::Path;

/// Column names of the report
pub const REPORT_HEADERS: [&str; 5] = [
    "page_url",
    "h1",
    "first_paragraph",
    "outgoing_link_urls",
    "image_urls",
];

/// Separator used inside the link and image columns
pub const LIST_DELIMITER: &str = ";";

/// Writes the report for `pages` to the file at `path`, replacing it
///
/// # Example
///
/// ```no_run
/// use site_tally::output::write_csv_report;
/// use site_tally::PageMap;
/// use std::path::Path;
///
/// let pages = PageMap::new();
/// write_csv_report(&pages, Path::new("report.csv")).unwrap();
/// ```
pub fn write_csv_report(pages: &PageMap, path: &Path) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(pages, file)?;
    tracing::info!("Wrote {} rows to {}", pages.len(), path.display());
    Ok(())
}

/// Writes the report for `pages` to any writer
pub fn write_csv<W: io::Write>(pages: &PageMap, sink: W) -> OutputResult<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(REPORT_HEADERS)?;

    let mut entries: Vec<_> = pages.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (_, record) in entries {
        writer.write_record(row(record))?;
    }

    writer.flush()?;
    Ok(())
}

fn row(record: &PageRecord) -> [String; 5] {
    [
        record.url.clone(),
        record.title.clone(),
        record.first_paragraph.clone(),
        record.outgoing_links.join(LIST_DELIMITER),
        record.image_urls.join(LIST_DELIMITER),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::PageData;
    use crate::normalize_url;
    use crate::FetchError;

    fn sample_pages() -> PageMap {
        let mut pages = PageMap::new();
        pages.insert(
            normalize_url("https://x.test/b").unwrap(),
            PageRecord::extracted(
                "https://x.test/b",
                PageData {
                    title: "Quotes \"here\", and commas".to_string(),
                    first_paragraph: "Line one\nLine two".to_string(),
                    links: vec!["https://x.test/".to_string(), "https://x.test/a".to_string()],
                    images: vec!["https://x.test/i.png".to_string()],
                },
            ),
        );
        pages.insert(
            normalize_url("https://x.test/a").unwrap(),
            PageRecord::failed("https://x.test/a", FetchError::Http { status: 404 }),
        );
        pages
    }

    fn read_back(bytes: &[u8]) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_header_and_rows() {
        let mut out = Vec::new();
        write_csv(&sample_pages(), &mut out).unwrap();
        let rows = read_back(&out);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], REPORT_HEADERS);
        // Sorted by normalized key
        assert_eq!(rows[1][0], "https://x.test/a");
        assert_eq!(rows[2][0], "https://x.test/b");
    }

    #[test]
    fn test_special_characters_survive() {
        let mut out = Vec::new();
        write_csv(&sample_pages(), &mut out).unwrap();
        let rows = read_back(&out);

        assert_eq!(rows[2][1], "Quotes \"here\", and commas");
        assert_eq!(rows[2][2], "Line one\nLine two");
        assert_eq!(rows[2][3], "https://x.test/;https://x.test/a");
        assert_eq!(rows[2][4], "https://x.test/i.png");

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Quotes \"\"here\"\", and commas\""));
    }

    #[test]
    fn test_failed_page_has_empty_fields() {
        let mut out = Vec::new();
        write_csv(&sample_pages(), &mut out).unwrap();
        let rows = read_back(&out);

        assert_eq!(rows[1], vec!["https://x.test/a", "", "", "", ""]);
    }

    #[test]
    fn test_empty_map_writes_header_only() {
        let mut out = Vec::new();
        write_csv(&PageMap::new(), &mut out).unwrap();
        assert_eq!(read_back(&out).len(), 1);
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_csv_report(&sample_pages(), &path).unwrap();

        let content = std::fs::read(&path).unwrap();
        assert_eq!(read_back(&content).len(), 3);
    }
}
