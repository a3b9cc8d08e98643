use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a user-selected video resource, usually a URI such as
/// `content://media/7` or `file:///home/me/clip.mp4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageHandle(String);

impl StorageHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        StorageHandle(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme of the handle, lowercased. `None` when the handle does not
    /// parse as an absolute URI.
    pub fn scheme(&self) -> Option<String> {
        url::Url::parse(&self.0)
            .ok()
            .map(|parsed| parsed.scheme().to_ascii_lowercase())
    }
}

impl fmt::Display for StorageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StorageHandle {
    fn from(uri: &str) -> Self {
        StorageHandle::new(uri)
    }
}

impl From<String> for StorageHandle {
    fn from(uri: String) -> Self {
        StorageHandle(uri)
    }
}

/// Playable reference handed to the engine. Built straight from the handle URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef {
    pub uri: String,
}

impl MediaRef {
    pub fn from_handle(handle: &StorageHandle) -> Self {
        MediaRef {
            uri: handle.as_str().to_string(),
        }
    }
}
