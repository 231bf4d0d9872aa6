//! Resource access abstraction for LESS stylesheets.
//!
//! This crate provides:
//! - The [`Resource`] trait, a backend-independent handle to stylesheet text
//!   with relative-path resolution
//! - Backends for local files, HTTP locations, multi-directory search paths,
//!   and in-memory strings
//! - Charset-aware decoding of stylesheet bytes ([`decode_text`])

mod decode;
mod error;
mod file;
mod http;
mod search_path;
mod string;

pub use decode::decode_text;
pub use error::{ResourceError, ResourceResult};
pub use file::FileResource;
pub use http::HttpResource;
pub use search_path::SearchPathResource;
pub use string::StringResource;

use std::time::SystemTime;

/// A thing that holds stylesheet text.
///
/// Abstracts source resolution from resource access technology: the same
/// import-inlining algorithm works over files, HTTP locations, search paths,
/// and in-memory strings.
///
/// `exists` and `last_modified` are probes and never fail; backends report
/// "does not exist" or [`SystemTime::UNIX_EPOCH`] instead of raising.
pub trait Resource: Send + Sync + std::fmt::Debug {
    /// Tests whether the resource exists.
    fn exists(&self) -> bool;

    /// The time the resource was last modified, or [`SystemTime::UNIX_EPOCH`]
    /// when the backend cannot tell.
    fn last_modified(&self) -> SystemTime;

    /// Reads the raw bytes of the resource.
    fn open(&self) -> ResourceResult<Vec<u8>>;

    /// Creates a resource for `path` resolved relative to this one.
    fn create_relative(&self, path: &str) -> ResourceResult<Box<dyn Resource>>;

    /// A stable, human-readable identifier for this resource. Used for
    /// diagnostics and as a map key.
    fn name(&self) -> String;
}
