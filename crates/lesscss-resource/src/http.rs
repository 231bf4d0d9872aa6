//! HTTP-backed resources.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;
use tracing::debug;
use url::Url;

use crate::error::{ResourceError, ResourceResult};
use crate::Resource;

/// A [`Resource`] fetched over HTTP(S).
///
/// `exists` and `last_modified` are connectivity probes: any transport
/// failure reads as "does not exist" / epoch rather than an error, because
/// callers only use them to decide whether and when to fetch.
#[derive(Debug, Clone)]
pub struct HttpResource {
    url: Url,
}

impl HttpResource {
    /// Parses `url` and wraps it. Fails with a resolution error when the
    /// string is not a valid absolute URL.
    pub fn new(url: &str) -> ResourceResult<Self> {
        let parsed = Url::parse(url).map_err(|source| ResourceError::Resolution {
            base: url.to_string(),
            path: url.to_string(),
            source,
        })?;
        Ok(Self { url: parsed })
    }

    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Resource for HttpResource {
    fn exists(&self) -> bool {
        // A reachable server counts as existing, error statuses included;
        // this probe only answers "can this location be talked to at all".
        match ureq::head(self.url.as_str()).call() {
            Ok(_) => true,
            Err(ureq::Error::StatusCode(_)) => true,
            Err(err) => {
                debug!(url = %self.url, error = %err, "probe failed");
                false
            }
        }
    }

    fn last_modified(&self) -> SystemTime {
        let response = match ureq::head(self.url.as_str()).call() {
            Ok(response) => response,
            Err(_) => return UNIX_EPOCH,
        };
        response
            .headers()
            .get("last-modified")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
            .map(SystemTime::from)
            .unwrap_or(UNIX_EPOCH)
    }

    fn open(&self) -> ResourceResult<Vec<u8>> {
        match ureq::get(self.url.as_str()).call() {
            Ok(response) => response
                .into_body()
                .read_to_vec()
                .map_err(|source| ResourceError::Http {
                    name: self.name(),
                    source: Box::new(source),
                }),
            Err(ureq::Error::StatusCode(404)) => Err(ResourceError::NotFound {
                name: self.name(),
            }),
            Err(source) => Err(ResourceError::Http {
                name: self.name(),
                source: Box::new(source),
            }),
        }
    }

    fn create_relative(&self, path: &str) -> ResourceResult<Box<dyn Resource>> {
        let resolved = self.url.join(path).map_err(|source| ResourceError::Resolution {
            base: self.url.to_string(),
            path: path.to_string(),
            source,
        })?;
        Ok(Box::new(HttpResource::from_url(resolved)))
    }

    fn name(&self) -> String {
        self.url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let err = HttpResource::new("::not a url::").unwrap_err();
        assert!(matches!(err, ResourceError::Resolution { .. }));
    }

    #[test]
    fn test_create_relative_uses_rfc3986_resolution() {
        let base = HttpResource::new("http://example.com/styles/main.less").unwrap();

        let sibling = base.create_relative("vars.less").unwrap();
        assert_eq!(sibling.name(), "http://example.com/styles/vars.less");

        let parent = base.create_relative("../reset.less").unwrap();
        assert_eq!(parent.name(), "http://example.com/reset.less");

        let absolute = base.create_relative("/top.less").unwrap();
        assert_eq!(absolute.name(), "http://example.com/top.less");
    }

    #[test]
    fn test_unreachable_host_probes_do_not_error() {
        // Port 9 (discard) is refused on any sane test machine.
        let resource = HttpResource::new("http://127.0.0.1:9/main.less").unwrap();
        assert!(!resource.exists());
        assert_eq!(resource.last_modified(), UNIX_EPOCH);
    }
}
