//! Error types for resource access.

use thiserror::Error;

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur while resolving or reading a resource
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource does not exist at resolution time
    #[error("resource not found: {name}")]
    NotFound { name: String },

    /// A relative path could not be turned into a valid child locator
    #[error("could not resolve {path:?} relative to {base}")]
    Resolution {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// An in-memory source has no location to resolve imports against
    #[error("string source {name:?} cannot resolve import {path:?}; pre-seed it as an import")]
    Configuration { name: String, path: String },

    /// Content could not be decoded with the determined charset
    #[error("could not decode {name} as {encoding}")]
    Decode {
        name: String,
        encoding: &'static str,
    },

    /// An HTTP fetch failed
    #[error("failed to fetch {name}")]
    Http {
        name: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// File I/O error
    #[error("failed to read {name}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
