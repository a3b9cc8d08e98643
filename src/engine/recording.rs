use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::PlaybackEngine;
use crate::error::EngineError;
use crate::types::handle::MediaRef;
use crate::types::playback_state::PlaybackState;

#[derive(Debug, Default)]
pub struct EngineLog {
    pub prepare_calls: usize,
    pub pause_calls: usize,
    pub resume_calls: usize,
    pub release_calls: usize,
    pub state: PlaybackState,
    pub fail_release: bool,
    pub fail_next_enqueue: bool,
    pub fail_next_pause: bool,
}

/// Engine double that records every call. The log outlives the engine, so
/// tests can still inspect it after the coordinator dropped the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    pub log: Rc<RefCell<EngineLog>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackEngine for RecordingEngine {
    fn prepare(&mut self) -> Result<(), EngineError> {
        self.log.borrow_mut().prepare_calls += 1;
        Ok(())
    }

    fn enqueue(&mut self, media: MediaRef) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        if std::mem::take(&mut log.fail_next_enqueue) {
            return Err(EngineError::Backend("enqueue refused".to_string()));
        }
        log.state.queue.push(media);
        Ok(())
    }

    fn set_current(&mut self, media: MediaRef) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        log.state.current = Some(media);
        log.state.is_playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        log.pause_calls += 1;
        if std::mem::take(&mut log.fail_next_pause) {
            return Err(EngineError::Backend("pause refused".to_string()));
        }
        log.state.is_playing = false;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        log.resume_calls += 1;
        log.state.is_playing = log.state.current.is_some();
        Ok(())
    }

    fn release(&mut self) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        log.release_calls += 1;
        if log.fail_release {
            return Err(EngineError::Backend("release refused".to_string()));
        }
        Ok(())
    }
}
