//! Filesystem-backed resources.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ResourceError, ResourceResult};
use crate::Resource;

/// A [`Resource`] backed by a file on the local filesystem.
///
/// Relative imports resolve against the parent directory of the wrapped path;
/// absolute import paths are taken as-is.
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The wrapped filesystem path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for FileResource {
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
        Ok(Box::new(FileResource::new(resolve_sibling(
            &self.path, path,
        ))))
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Resolve an import path against `base`: absolute paths are used directly,
/// relative paths resolve against the parent directory of `base`.
pub(crate) fn resolve_sibling(base: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }
    match base.parent() {
        Some(parent) => parent.join(candidate),
        None => candidate.to_path_buf(),
    }
}

pub(crate) fn file_last_modified(path: &Path) -> SystemTime {
    path.metadata()
        .and_then(|metadata| metadata.modified())
        .unwrap_or(UNIX_EPOCH)
}

pub(crate) fn read_file(path: &Path) -> ResourceResult<Vec<u8>> {
    if !path.exists() {
        return Err(ResourceError::NotFound {
            name: path.display().to_string(),
        });
    }
    std::fs::read(path).map_err(|source| ResourceError::Io {
        name: path.display().to_string(),
        source,
    })
}
