use crate::types::handle::StorageHandle;
use serde::{Deserialize, Serialize};

/// SessionState is the persisted half of a video session: the handles the user
/// picked, in the order they were picked. Duplicates are kept.
/// Display names and the engine selection are runtime only and rebuilt from this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub handles: Vec<StorageHandle>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            handles: Vec::new(),
        }
    }

    pub fn from_handles(handles: Vec<StorageHandle>) -> Self {
        SessionState { handles }
    }

    pub fn push(&mut self, handle: StorageHandle) {
        self.handles.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order_and_duplicates() {
        let mut state = SessionState::new();
        state.push(StorageHandle::new("content://media/1"));
        state.push(StorageHandle::new("content://media/2"));
        state.push(StorageHandle::new("content://media/1"));
        let uris: Vec<&str> = state.handles.iter().map(|h| h.as_str()).collect();
        assert_eq!(
            uris,
            vec!["content://media/1", "content://media/2", "content://media/1"]
        );
    }

    #[test]
    fn test_state_json_shape() {
        let state = SessionState::from_handles(vec![StorageHandle::new("content://media/7")]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"handles":["content://media/7"]}"#);
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
