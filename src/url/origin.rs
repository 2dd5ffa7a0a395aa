use crate::UrlError;
use url::{Origin, Url};

/// The scheme + host + port a crawl is confined to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteScope {
    origin: Origin,
}

impl SiteScope {
    /// Builds the scope from the seed URL
    ///
    /// The seed must be an absolute HTTP(S) URL with a host.
    pub fn from_seed(seed: &str) -> Result<Self, UrlError> {
        let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Seed URL must use HTTP or HTTPS, got: {}",
                url.scheme()
            )));
        }

        if url.host_str().is_none() {
            return Err(UrlError::MissingHost(seed.to_string()));
        }

        Ok(Self {
            origin: url.origin(),
        })
    }

    /// Returns true if `url` parses and shares the seed's origin
    ///
    /// Unparseable URLs and opaque origins (`mailto:`, `data:` ...) are outside.
    pub fn contains(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed.origin() == self.origin,
            Err(_) => false,
        }
    }

    /// Serialized origin, e.g. `https://example.com:8443`
    pub fn as_string(&self) -> String {
        self.origin.ascii_serialization()
    }
}
