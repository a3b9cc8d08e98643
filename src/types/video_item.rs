use crate::types::handle::{MediaRef, StorageHandle};

/// Display name used when a handle cannot be resolved.
pub const NO_NAME: &str = "No name";

/// A selectable entry of the video list. Always derived from a handle, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoItem {
    pub handle: StorageHandle,
    pub display_name: String,
    pub media_ref: MediaRef,
}

impl VideoItem {
    /// Builds the projection of `handle`, falling back to [`NO_NAME`].
    pub fn project(handle: &StorageHandle, resolved_name: Option<String>) -> Self {
        VideoItem {
            handle: handle.clone(),
            display_name: resolved_name.unwrap_or_else(|| NO_NAME.to_string()),
            media_ref: MediaRef::from_handle(handle),
        }
    }
}
