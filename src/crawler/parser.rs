//! HTML parser for extracting page data
//!
//! This module handles parsing HTML content to extract:
//! - The first-level heading
//! - The leading paragraph, preferring the `<main>` landmark
//! - Outgoing links (from `<a href>`)
//! - Image references (from `<img src>`)

use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    /// Text of the first `<h1>`, trimmed
    pub title: String,

    /// Text of the leading paragraph, trimmed
    pub first_paragraph: String,

    /// All link targets, resolved to absolute URLs, in document order
    pub links: Vec<String>,

    /// All image sources, resolved to absolute URLs, in document order
    pub images: Vec<String>,
}

/// Parses HTML content and extracts page data
///
/// Markup is parsed best-effort: unclosed or misnested tags are repaired by the
/// HTML5 parser rather than rejected. Empty HTML yields empty data.
///
/// # Link Extraction Rules
///
/// - Every `<a href>` and `<img src>` is resolved against `base_url`
/// - References that cannot be resolved are skipped
/// - No scheme filtering happens here; `mailto:` and friends come through as-is
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the page was fetched from
///
/// # Returns
///
/// * `Ok(PageData)` - Extracted data
/// * `Err(ExtractionError)` - `base_url` is not an absolute URL
///
/// # Example
///
/// ```
/// use site_tally::crawler::extract_page_data;
///
/// let html = r#"<html><body><h1>Hi</h1><p>Intro</p><a href="/page">Link</a></body></html>"#;
/// let data = extract_page_data(html, "https://example.com/").unwrap();
/// assert_eq!(data.title, "Hi");
/// assert_eq!(data.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn extract_page_data(html: &str, base_url: &str) -> Result<PageData, ExtractionError> {
    if html.is_empty() {
        return Ok(PageData::default());
    }

    let base = Url::parse(base_url).map_err(|_| ExtractionError::InvalidBase(base_url.to_string()))?;
    let document = Html::parse_document(html);

    Ok(PageData {
        title: extract_title(&document),
        first_paragraph: extract_first_paragraph(&document),
        links: extract_attr_urls(&document, "a[href]", "href", &base),
        images: extract_attr_urls(&document, "img[src]", "src", &base),
    })
}

/// Text of the first `<h1>` in the document
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("h1") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// First `<p>` under `<main>`, falling back to the first `<p>` anywhere
fn extract_first_paragraph(document: &Html) -> String {
    let (Ok(main_selector), Ok(p_selector)) = (Selector::parse("main"), Selector::parse("p"))
    else {
        return String::new();
    };

    let from_main = document
        .select(&main_selector)
        .next()
        .and_then(|main| main.select(&p_selector).next())
        .map(element_text)
        .unwrap_or_default();

    if !from_main.is_empty() {
        return from_main;
    }

    document
        .select(&p_selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Resolves the given attribute of every matching element against `base`
fn extract_attr_urls(document: &Html, selector: &str, attr: &str, base: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|reference| resolve_reference(reference, base))
        .collect()
}

/// Resolves a reference to an absolute URL, or None if it cannot be parsed
fn resolve_reference(reference: &str, base: &Url) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    match base.join(reference) {
        Ok(absolute) => Some(absolute.to_string()),
        Err(e) => {
            tracing::debug!("Cannot parse url {}: {}", reference, e);
            None
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    #[test]
    fn test_extract_basic_page() {
        let html = r#"
            <html><body>
                <h1>Test Title</h1>
                <p>This is the first paragraph.</p>
                <a href="/link1">Link 1</a>
                <img src="/image1.jpg" alt="Image 1">
            </body></html>
        "#;
        let data = extract_page_data(html, "https://blog.boot.dev").unwrap();

        assert_eq!(data.title, "Test Title");
        assert_eq!(data.first_paragraph, "This is the first paragraph.");
        assert_eq!(data.links, vec!["https://blog.boot.dev/link1"]);
        assert_eq!(data.images, vec!["https://blog.boot.dev/image1.jpg"]);
    }

    #[test]
    fn test_main_paragraph_precedence() {
        let html = r#"
            <html><body>
                <header>
                    <h1>Main Title</h1>
                    <p>Header paragraph (ignored)</p>
                </header>
                <main>
                    <p>Main paragraph</p>
                    <p>Second main paragraph</p>
                    <a href="/internal">Internal Link</a>
                    <a href="https://external.com">External Link</a>
                    <img src="./main.jpg" alt="Main image">
                </main>
                <footer>
                    <p>Footer paragraph (ignored)</p>
                    <img src="/footer.png" alt="Footer image">
                </footer>
            </body></html>
        "#;
        let data = extract_page_data(html, BASE).unwrap();

        assert_eq!(data.title, "Main Title");
        assert_eq!(data.first_paragraph, "Main paragraph");
        assert_eq!(
            data.links,
            vec!["https://example.com/internal", "https://external.com/"]
        );
        assert_eq!(
            data.images,
            vec!["https://example.com/main.jpg", "https://example.com/footer.png"]
        );
    }

    #[test]
    fn test_main_without_paragraph_falls_back() {
        let html = "<p>Outside</p><main><div>No paragraph</div></main>";
        let data = extract_page_data(html, BASE).unwrap();
        assert_eq!(data.first_paragraph, "Outside");
    }

    #[test]
    fn test_no_relevant_tags() {
        let html = "<html><body><div>No content here</div></body></html>";
        let data = extract_page_data(html, BASE).unwrap();
        assert_eq!(data, PageData::default());
    }

    #[test]
    fn test_empty_html_is_no_data() {
        assert_eq!(extract_page_data("", BASE).unwrap(), PageData::default());
        assert_eq!(extract_page_data("", "").unwrap(), PageData::default());
    }

    #[test]
    fn test_invalid_base_is_an_error() {
        let result = extract_page_data("<p>text</p>", "not a url");
        assert!(matches!(result, Err(ExtractionError::InvalidBase(_))));
    }

    #[test]
    fn test_title_is_first_h1_trimmed() {
        let html = "<h1>  First  </h1><h1>Second</h1>";
        assert_eq!(extract_page_data(html, BASE).unwrap().title, "First");
    }

    #[test]
    fn test_paragraph_nested_text_and_entities() {
        let html = "<p>Welcome to <span>my</span> website &amp; blog</p>";
        assert_eq!(
            extract_page_data(html, BASE).unwrap().first_paragraph,
            "Welcome to my website & blog"
        );
    }

    #[test]
    fn test_malformed_html_best_effort() {
        let html = "<p>Unclosed paragraph";
        assert_eq!(
            extract_page_data(html, BASE).unwrap().first_paragraph,
            "Unclosed paragraph"
        );
    }

    #[test]
    fn test_mixed_case_tags() {
        let html = r#"<P>Mixed Case Paragraph</P><IMG SRC="/uppercase.jpg"><A HREF="/up">x</A>"#;
        let data = extract_page_data(html, BASE).unwrap();
        assert_eq!(data.first_paragraph, "Mixed Case Paragraph");
        assert_eq!(data.images, vec!["https://example.com/uppercase.jpg"]);
        assert_eq!(data.links, vec!["https://example.com/up"]);
    }

    #[test]
    fn test_whitespace_paragraph_is_empty() {
        assert_eq!(extract_page_data("<p>   </p>", BASE).unwrap().first_paragraph, "");
    }

    #[test]
    fn test_relative_links_resolve_against_page() {
        let html = r#"<a href="other">Rel</a><a href="../up">Up</a>"#;
        let data = extract_page_data(html, "https://example.com/dir/page").unwrap();
        assert_eq!(
            data.links,
            vec!["https://example.com/dir/other", "https://example.com/up"]
        );
    }

    #[test]
    fn test_links_keep_query_and_foreign_schemes() {
        let html = r#"<a href="/a?x=1#top">A</a><a href="mailto:me@example.com">Mail</a>"#;
        let data = extract_page_data(html, BASE).unwrap();
        assert_eq!(
            data.links,
            vec!["https://example.com/a?x=1#top", "mailto:me@example.com"]
        );
    }

    #[test]
    fn test_unparseable_reference_skipped() {
        let html = r#"<a href="http://[::1">Bad</a><a href="/good">Good</a>"#;
        let data = extract_page_data(html, BASE).unwrap();
        assert_eq!(data.links, vec!["https://example.com/good"]);
    }

    #[test]
    fn test_img_without_src_ignored() {
        let html = r#"<img alt="No src"><img src="/valid.jpg" alt="Valid image">"#;
        assert_eq!(
            extract_page_data(html, BASE).unwrap().images,
            vec!["https://example.com/valid.jpg"]
        );
    }

    #[test]
    fn test_img_src_entities_decoded() {
        let html = r#"<img src="/image?name=photo&amp;id=1.jpg" alt="Image">"#;
        assert_eq!(
            extract_page_data(html, BASE).unwrap().images,
            vec!["https://example.com/image?name=photo&id=1.jpg"]
        );
    }
}
