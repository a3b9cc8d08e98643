use std::sync::{Arc, Mutex};

// GStreamer imports for playback
use gst::prelude::*;
use gstreamer as gst;

use crate::engine::PlaybackEngine;
use crate::error::EngineError;
use crate::types::handle::MediaRef;
use crate::types::playback_state::PlaybackState;

/// Playback engine on top of a GStreamer `playbin`.
///
/// The queue lives next to the pipeline and is shared with the
/// `about-to-finish` handler, which runs on a streaming thread and chains the
/// next queued reference for gapless playback.
pub struct GstEngine {
    playbin: Option<gst::Element>,
    state: Arc<Mutex<GstQueue>>,
}

#[derive(Debug, Default)]
struct GstQueue {
    playback: PlaybackState,
    // Queue position of the current reference; duplicates make the ref alone ambiguous.
    cursor: Option<usize>,
}

impl GstEngine {
    pub fn new() -> Self {
        Self {
            playbin: None,
            state: Arc::new(Mutex::new(GstQueue::default())),
        }
    }

    /// Snapshot of the queue and current selection.
    pub fn state(&self) -> Result<PlaybackState, EngineError> {
        self.with_state(|state| state.playback.clone())
    }

    /// Block until the pipeline reports end-of-stream or an error.
    pub fn wait_until_finished(&self) -> Result<(), EngineError> {
        let playbin = self.playbin()?;
        let bus = playbin
            .bus()
            .ok_or_else(|| EngineError::Backend("playbin has no bus".to_string()))?;
        for msg in bus.iter_timed(gst::ClockTime::NONE) {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    tracing::info!("End of stream");
                    return Ok(());
                }
                MessageView::Error(err) => {
                    return Err(EngineError::Backend(format!(
                        "{} ({:?})",
                        err.error(),
                        err.debug()
                    )));
                }
                _ => (),
            }
        }
        Ok(())
    }

    fn playbin(&self) -> Result<&gst::Element, EngineError> {
        self.playbin.as_ref().ok_or(EngineError::NotPrepared)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut GstQueue) -> R) -> Result<R, EngineError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| EngineError::Backend("playback state lock poisoned".to_string()))?;
        Ok(f(&mut state))
    }

    fn set_pipeline_state(&self, target: gst::State) -> Result<(), EngineError> {
        self.playbin()?
            .set_state(target)
            .map(|_| ())
            .map_err(|e| EngineError::Backend(format!("{:?} -> {}", target, e)))
    }
}

impl Default for GstEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GstQueue {
    fn select(&mut self, media: MediaRef) {
        self.cursor = self.playback.queue.iter().position(|queued| queued == &media);
        self.playback.current = Some(media);
        self.playback.is_playing = true;
    }

    /// Moves the selection to the reference queued after the current one.
    fn advance(&mut self) -> Option<MediaRef> {
        let position = self.cursor? + 1;
        let next = self.playback.queue.get(position)?.clone();
        self.cursor = Some(position);
        self.playback.current = Some(next.clone());
        Some(next)
    }
}

impl PlaybackEngine for GstEngine {
    fn prepare(&mut self) -> Result<(), EngineError> {
        gst::init().map_err(|e| EngineError::Backend(e.to_string()))?;
        let playbin = gst::ElementFactory::make("playbin")
            .name("vidsession-playbin")
            .build()
            .map_err(|e| EngineError::Backend(e.to_string()))?;

        let state = Arc::clone(&self.state);
        playbin.connect("about-to-finish", false, move |values| {
            let Ok(playbin) = values[0].get::<gst::Element>() else {
                return None;
            };
            let next = state.lock().ok().and_then(|mut queue| queue.advance());
            if let Some(next) = next {
                tracing::debug!(uri = next.uri.as_str(), "Chaining next queued video");
                playbin.set_property("uri", next.uri.as_str());
            }
            None
        });

        playbin
            .set_state(gst::State::Ready)
            .map_err(|e| EngineError::Backend(e.to_string()))?;
        self.playbin = Some(playbin);
        Ok(())
    }

    fn enqueue(&mut self, media: MediaRef) -> Result<(), EngineError> {
        self.playbin()?;
        self.with_state(|state| state.playback.queue.push(media))
    }

    fn set_current(&mut self, media: MediaRef) -> Result<(), EngineError> {
        self.set_pipeline_state(gst::State::Ready)?;
        self.playbin()?.set_property("uri", media.uri.as_str());
        self.set_pipeline_state(gst::State::Playing)?;
        self.with_state(|state| state.select(media))
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        if self.with_state(|state| state.playback.current.is_some())? {
            self.set_pipeline_state(gst::State::Paused)?;
        }
        self.with_state(|state| state.playback.is_playing = false)
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        if self.with_state(|state| state.playback.current.is_some())? {
            self.set_pipeline_state(gst::State::Playing)?;
            self.with_state(|state| state.playback.is_playing = true)?;
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), EngineError> {
        self.set_pipeline_state(gst::State::Null)?;
        self.playbin = None;
        self.with_state(|state| *state = GstQueue::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(uri: &str) -> MediaRef {
        MediaRef {
            uri: uri.to_string(),
        }
    }

    #[test]
    fn test_unprepared_engine_rejects_transport() {
        let mut engine = GstEngine::new();
        assert!(matches!(
            engine.enqueue(media("file:///a.mp4")),
            Err(EngineError::NotPrepared)
        ));
        assert!(matches!(engine.release(), Err(EngineError::NotPrepared)));
        assert!(engine.state().unwrap().queue.is_empty());
    }

    #[test]
    fn test_advance_moves_to_next_queued() {
        let mut queue = GstQueue::default();
        queue.playback.queue = vec![media("file:///a.mp4"), media("file:///b.mp4")];
        queue.select(media("file:///a.mp4"));
        assert_eq!(queue.advance(), Some(media("file:///b.mp4")));
        assert_eq!(queue.playback.current, Some(media("file:///b.mp4")));
        // End of the queue.
        assert_eq!(queue.advance(), None);
        assert_eq!(queue.playback.current, Some(media("file:///b.mp4")));
    }

    #[test]
    fn test_advance_walks_past_duplicates() {
        let mut queue = GstQueue::default();
        queue.playback.queue = vec![
            media("file:///a.mp4"),
            media("file:///b.mp4"),
            media("file:///a.mp4"),
        ];
        queue.select(media("file:///a.mp4"));
        assert_eq!(queue.advance(), Some(media("file:///b.mp4")));
        assert_eq!(queue.advance(), Some(media("file:///a.mp4")));
        assert_eq!(queue.advance(), None);
    }

    #[test]
    fn test_advance_without_selection() {
        let mut queue = GstQueue::default();
        queue.playback.queue = vec![media("file:///a.mp4")];
        assert_eq!(queue.advance(), None);
    }
}
