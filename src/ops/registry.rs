use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::ops::resolver::HandleResolver;
use crate::storage::HandleStore;
use crate::types::handle::StorageHandle;
use crate::types::session::SessionState;
use crate::types::video_item::VideoItem;

/// Ordered registry of the videos picked during a session.
///
/// Owns the [`SessionState`]; everything else is projected from it on demand.
pub struct VideoRegistry {
    state: SessionState,
    resolver: HandleResolver,
    store: Box<dyn HandleStore>,
}

impl VideoRegistry {
    pub fn new(resolver: HandleResolver, store: impl HandleStore + 'static) -> Self {
        VideoRegistry {
            state: SessionState::new(),
            resolver,
            store: Box::new(store),
        }
    }

    /// Append a handle and persist the new list. Duplicates are kept.
    ///
    /// A failing store is logged and otherwise ignored: the in-memory list
    /// stays the source of truth for the running session.
    pub fn add_handle(&mut self, handle: StorageHandle) {
        debug!(handle = handle.as_str(), "Adding handle");
        self.state.push(handle);
        if let Err(e) = self.store.save(&self.state) {
            warn!(error = %e, handles = self.state.handles.len(), "Could not persist handles");
        }
    }

    /// Resolve every handle, in insertion order.
    pub fn list_items(&self) -> Vec<VideoItem> {
        self.state
            .handles
            .iter()
            .map(|handle| VideoItem::project(handle, self.resolver.resolve(handle)))
            .collect()
    }

    /// First item projected from `handle`, if the handle is registered.
    pub fn find(&self, handle: &StorageHandle) -> Option<VideoItem> {
        self.list_items()
            .into_iter()
            .find(|item| &item.handle == handle)
    }

    /// Replace the handle list with a previously persisted one. Handles are
    /// not checked here; bad ones simply resolve to the sentinel name.
    pub fn restore(&mut self, state: SessionState) {
        info!(handles = state.handles.len(), "Restoring session state");
        self.state = state;
    }

    /// Restore from the backing store. Returns how many handles came back.
    pub fn restore_from_store(&mut self) -> Result<usize, SessionError> {
        let restored = self.store.load()?.unwrap_or_default();
        let count = restored.handles.len();
        self.restore(restored);
        Ok(count)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn handles(&self) -> &[StorageHandle] {
        &self.state.handles
    }

    pub fn len(&self) -> usize {
        self.state.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.handles.is_empty()
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }
}
