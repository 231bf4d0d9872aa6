//! In-memory string resources.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ResourceError, ResourceResult};
use crate::Resource;

/// A [`Resource`] holding literal stylesheet text with no backing location.
///
/// Always exists and carries no modification time. Because there is no
/// location to resolve against, `create_relative` fails: a string-sourced
/// document may only import stylesheets that the caller pre-supplies.
#[derive(Debug, Clone)]
pub struct StringResource {
    text: String,
    name: String,
}

impl StringResource {
    pub fn new(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Resource for StringResource {
    fn exists(&self) -> bool {
        true
    }

    fn last_modified(&self) -> SystemTime {
        UNIX_EPOCH
    }

    fn open(&self) -> ResourceResult<Vec<u8>> {
        Ok(self.text.clone().into_bytes())
    }

    fn create_relative(&self, path: &str) -> ResourceResult<Box<dyn Resource>> {
        Err(ResourceError::Configuration {
            name: self.name.clone(),
            path: path.to_string(),
        })
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
