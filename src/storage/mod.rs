use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StoreError;
use crate::types::session::SessionState;

/// Persistence slot for the ordered handle list.
pub trait HandleStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SessionState>, StoreError>;
    fn save(&mut self, state: &SessionState) -> Result<(), StoreError>;
}

/// In-process store. Clones share the same slot, which lets a restarted
/// registry read what a previous one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<SessionState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<SessionState> {
        self.slot.borrow().clone()
    }
}

impl HandleStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionState>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(state.clone());
        Ok(())
    }
}

/// Stores the session state as pretty JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HandleStore for JsonFileStore {
    fn load(&self) -> Result<Option<SessionState>, StoreError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        // Written beside the target, then renamed over it.
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::handle::StorageHandle;

    fn sample_state() -> SessionState {
        SessionState::from_handles(vec![
            StorageHandle::new("content://media/1"),
            StorageHandle::new("file:///videos/car.mp4"),
        ])
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let mut store = MemoryStore::new();
        let reader = store.clone();
        assert!(reader.load().unwrap().is_none());
        store.save(&sample_state()).unwrap();
        assert_eq!(reader.load().unwrap(), Some(sample_state()));
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_json_store_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("state.json"));
        store.save(&sample_state()).unwrap();
        let reopened = JsonFileStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load().unwrap(), Some(sample_state()));
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn test_json_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ broken").unwrap();
        let store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }
}
