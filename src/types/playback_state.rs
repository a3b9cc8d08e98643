use crate::types::handle::MediaRef;

/// Engine-side view of playback. Ephemeral: never persisted, lost on restart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub queue: Vec<MediaRef>,
    pub current: Option<MediaRef>,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            current: None,
            is_playing: false,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
