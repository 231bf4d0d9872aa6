//! File resources with additional search directories.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::ResourceResult;
use crate::file::{file_last_modified, read_file, resolve_sibling};
use crate::Resource;

/// A file-backed [`Resource`] that probes an ordered list of extra
/// directories when resolving relative imports.
///
/// Resolution order for a relative import path:
/// 1. each search directory, in order, taking the first `directory/path`
///    that exists,
/// 2. otherwise the parent directory of the primary file, the same as
///    [`crate::FileResource`].
///
/// Absolute import paths bypass the search entirely. Resolved children keep
/// the same search directories.
#[derive(Debug, Clone)]
pub struct SearchPathResource {
    path: PathBuf,
    search_paths: Vec<PathBuf>,
}

impl SearchPathResource {
    pub fn new(path: impl Into<PathBuf>, search_paths: Vec<PathBuf>) -> Self {
        Self {
            path: path.into(),
            search_paths,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            return candidate.to_path_buf();
        }
        for dir in &self.search_paths {
            let probe = dir.join(candidate);
            if probe.exists() {
                debug!(path, found = %probe.display(), "import found on search path");
                return probe;
            }
        }
        resolve_sibling(&self.path, path)
    }
}

impl Resource for SearchPathResource {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn last_modified(&self) -> SystemTime {
        file_last_modified(&self.path)
    }

    fn open(&self) -> ResourceResult<Vec<u8>> {
        read_file(&self.path)
    }

    fn create_relative(&self, path: &str) -> ResourceResult<Box<dyn Resource>> {
        Ok(Box::new(SearchPathResource::new(
            self.resolve(path),
            self.search_paths.clone(),
        )))
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
