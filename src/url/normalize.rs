use crate::UrlError;
use std::fmt;
use url::Url;

/// A URL in canonical comparison form, used as the deduplication key
///
/// Built only by [`normalize_url`]: lower-cased, no query, no fragment, no
/// trailing slash, default port implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrawlUrl(String);

impl CrawlUrl {
    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CrawlUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CrawlUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a URL into its deduplication key
///
/// # Normalization Steps
///
/// 1. Lowercase the entire input
/// 2. Parse the URL; reject if malformed, hostless, or not HTTP(S)
/// 3. Drop the query string and fragment
/// 4. Strip the trailing `/` from the path (so the root path becomes empty)
/// 5. Join as `scheme://host[:port]path`, where the port appears only when it is
///    not the scheme's default
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(CrawlUrl)` - Normalized key
/// * `Err(UrlError)` - Failed to parse the URL
///
/// # Examples
///
/// ```
/// use site_tally::url::normalize_url;
///
/// let key = normalize_url("HTTPS://EXAMPLE.COM/a/?x=1#f").unwrap();
/// assert_eq!(key.as_str(), "https://example.com/a");
/// ```
pub fn normalize_url(url_str: &str) -> Result<CrawlUrl, UrlError> {
    let lowered = url_str.trim().to_lowercase();

    let url = Url::parse(&lowered).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(url_str.to_string()))?;

    // Repeated trailing slashes collapse too, otherwise "/a//" -> "/a/" -> "/a"
    let path = url.path().trim_end_matches('/');

    // Url::port() is None when the port equals the scheme's default
    let key = match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, path),
        None => format!("{}://{}{}", url.scheme(), host, path),
    };

    Ok(CrawlUrl(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(input: &str) -> String {
        normalize_url(input).unwrap().into_string()
    }

    #[test]
    fn test_lowercase_everything() {
        assert_eq!(key("HTTPS://EXAMPLE.COM/PATH"), "https://example.com/path");
    }

    #[test]
    fn test_remove_query() {
        assert_eq!(key("https://example.com/path?a=1&b=2"), "https://example.com/path");
    }

    #[test]
    fn test_remove_fragment() {
        assert_eq!(key("https://example.com/path#section"), "https://example.com/path");
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(key("https://example.com/path/"), "https://example.com/path");
    }

    #[test]
    fn test_root_has_no_trailing_slash() {
        assert_eq!(key("https://example.com/"), "https://example.com");
        assert_eq!(key("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_default_port_is_implicit() {
        assert_eq!(key("https://example.com:443/a"), "https://example.com/a");
        assert_eq!(key("http://example.com:80/a"), "http://example.com/a");
    }

    #[test]
    fn test_explicit_port_preserved() {
        assert_eq!(key("http://example.com:8080/path"), "http://example.com:8080/path");
        assert_eq!(key("http://127.0.0.1:3000/"), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_equivalent_surface_forms() {
        assert_eq!(
            normalize_url("HTTPS://EXAMPLE.COM/a/?x=1#f").unwrap(),
            normalize_url("https://example.com/a").unwrap()
        );
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "https://example.com",
            "https://example.com/",
            "HTTP://Example.com:8080/Deep/Path/?q=1",
            "https://example.com/a/b/#frag",
            "https://example.com/a/../b/./c",
            "https://example.com/a//",
        ] {
            let once = normalize_url(input).unwrap();
            let twice = normalize_url(once.as_str()).unwrap();
            assert_eq!(once, twice, "normalization of {} is not idempotent", input);
        }
    }

    #[test]
    fn test_dot_segments_resolved() {
        assert_eq!(key("https://example.com/a/../b/./c"), "https://example.com/b/c");
    }

    #[test]
    fn test_repeated_trailing_slashes_stripped() {
        assert_eq!(key("https://example.com/a//"), "https://example.com/a");
        assert_eq!(
            normalize_url("https://example.com/a//").unwrap(),
            normalize_url("https://example.com/a/").unwrap()
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(normalize_url("not-a-valid-url"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(normalize_url(""), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_invalid_scheme() {
        assert!(matches!(
            normalize_url("ftp://example.com/file"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(
            normalize_url("mailto:someone@example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }
}
