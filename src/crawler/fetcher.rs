//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the identifying user agent
//! - GET requests to fetch page content
//! - Classifying failed statuses and non-HTML responses
//!
//! The coordinator only sees the [`Fetcher`] trait, so tests can serve pages from
//! memory and count requests.

use crate::config::UserAgentConfig;
use crate::FetchError;
use futures::future::BoxFuture;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;

/// Retrieves the HTML for a URL
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns its body if it is an HTML page
    ///
    /// Fails with [`FetchError::Http`] for non-2xx statuses and
    /// [`FetchError::ContentType`] when the response is not `text/html`.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout; `None` waits indefinitely
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_tally::config::UserAgentConfig;
/// use site_tally::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Option<Duration>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// [`Fetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the user agent configuration
    pub fn from_config(
        config: &UserAgentConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config, timeout)?))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(fetch_html(&self.client, url))
    }
}

/// Fetches a URL and returns its body if the response is a successful HTML page
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Non-2xx status | `FetchError::Http { status }` |
/// | Missing or non-HTML Content-Type | `FetchError::ContentType` |
/// | Connection, timeout, body read failure | `FetchError::Network` |
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(classify_network_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Err(FetchError::ContentType { content_type });
    }

    response.text().await.map_err(classify_network_error)
}

/// Returns true for `text/html` content types, parameters allowed
fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

fn classify_network_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Network("Request timeout".to_string())
    } else if e.is_connect() {
        FetchError::Network(format!("Connection failed: {}", e))
    } else {
        FetchError::Network(e.to_string())
    }
}
