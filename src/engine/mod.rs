pub mod gst_engine;
#[cfg(test)]
pub mod recording;

use crate::error::EngineError;
use crate::types::handle::MediaRef;

/// Transport-level contract of a playback engine.
///
/// The coordinator calls `prepare` once, `enqueue` per added item,
/// `set_current` per successful selection, `pause`/`resume` on lifecycle
/// transitions and `release` once at shutdown. `pause` and `resume` must
/// accept repeated calls.
pub trait PlaybackEngine {
    fn prepare(&mut self) -> Result<(), EngineError>;
    fn enqueue(&mut self, media: MediaRef) -> Result<(), EngineError>;
    fn set_current(&mut self, media: MediaRef) -> Result<(), EngineError>;
    fn pause(&mut self) -> Result<(), EngineError>;
    fn resume(&mut self) -> Result<(), EngineError>;
    fn release(&mut self) -> Result<(), EngineError>;
}
