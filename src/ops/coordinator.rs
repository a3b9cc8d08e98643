use std::fmt;
use tracing::{debug, info, warn};

use crate::engine::PlaybackEngine;
use crate::error::SessionError;
use crate::ops::registry::VideoRegistry;
use crate::types::handle::{MediaRef, StorageHandle};
use crate::types::video_item::VideoItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    Uninitialized,
    Ready,
    Released,
}

impl fmt::Display for CoordinatorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinatorPhase::Uninitialized => "uninitialized",
            CoordinatorPhase::Ready => "ready",
            CoordinatorPhase::Released => "released",
        };
        f.write_str(name)
    }
}

// The engine only exists in the phases where calling it is legal.
enum EngineSlot<E> {
    Uninitialized(E),
    Ready(E),
    Released,
}

/// Single owner of the playback engine for one session.
///
/// Phases: `Uninitialized --initialize--> Ready --shutdown--> Released`.
/// Anything but `initialize` before `Ready`, and anything but `shutdown`
/// after release, fails with [`SessionError::InvalidLifecycle`] and leaves
/// both the registry and the engine untouched.
pub struct PlaybackCoordinator<E: PlaybackEngine> {
    registry: VideoRegistry,
    engine: EngineSlot<E>,
}

impl<E: PlaybackEngine> PlaybackCoordinator<E> {
    pub fn new(registry: VideoRegistry, engine: E) -> Self {
        PlaybackCoordinator {
            registry,
            engine: EngineSlot::Uninitialized(engine),
        }
    }

    pub fn phase(&self) -> CoordinatorPhase {
        match self.engine {
            EngineSlot::Uninitialized(_) => CoordinatorPhase::Uninitialized,
            EngineSlot::Ready(_) => CoordinatorPhase::Ready,
            EngineSlot::Released => CoordinatorPhase::Released,
        }
    }

    pub fn registry(&self) -> &VideoRegistry {
        &self.registry
    }

    /// The engine, while it has not been released.
    pub fn engine(&self) -> Option<&E> {
        match &self.engine {
            EngineSlot::Uninitialized(engine) | EngineSlot::Ready(engine) => Some(engine),
            EngineSlot::Released => None,
        }
    }

    pub fn items(&self) -> Vec<VideoItem> {
        self.registry.list_items()
    }

    /// Prepare the engine. Must be the first call, and happens once.
    pub fn initialize(&mut self) -> Result<(), SessionError> {
        let phase = self.phase();
        let mut engine = match std::mem::replace(&mut self.engine, EngineSlot::Released) {
            EngineSlot::Uninitialized(engine) => engine,
            other => {
                self.engine = other;
                return Err(SessionError::invalid_lifecycle("initialize", phase));
            }
        };

        if let Err(e) = engine.prepare() {
            self.engine = EngineSlot::Uninitialized(engine);
            return Err(e.into());
        }
        info!(items = self.registry.len(), "Playback engine prepared");
        self.engine = EngineSlot::Ready(engine);
        Ok(())
    }

    /// Register a handle and queue it on the engine behind the existing items.
    pub fn add_handle(&mut self, handle: StorageHandle) -> Result<(), SessionError> {
        let media = MediaRef::from_handle(&handle);
        // Queue first: a refused enqueue must not leave the handle registered.
        self.ready_engine("add_handle")?.enqueue(media)?;
        self.registry.add_handle(handle);
        Ok(())
    }

    /// Make `handle` the current video. Returns `false`, without touching the
    /// engine, when the handle is not registered.
    pub fn select(&mut self, handle: &StorageHandle) -> Result<bool, SessionError> {
        self.ready_engine("select")?;
        let Some(item) = self.registry.find(handle) else {
            debug!(handle = handle.as_str(), "Select ignored, unknown handle");
            return Ok(false);
        };
        info!(name = item.display_name.as_str(), "Selecting video");
        self.ready_engine("select")?.set_current(item.media_ref)?;
        Ok(true)
    }

    pub fn on_lifecycle_pause(&mut self) -> Result<(), SessionError> {
        debug!("Lifecycle pause");
        self.ready_engine("on_lifecycle_pause")?.pause()?;
        Ok(())
    }

    pub fn on_lifecycle_resume(&mut self) -> Result<(), SessionError> {
        debug!("Lifecycle resume");
        self.ready_engine("on_lifecycle_resume")?.resume()?;
        Ok(())
    }

    /// Release the engine. Safe in every phase; only the first call out of
    /// `Ready` reaches the engine. A never-prepared engine is dropped as is.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        match std::mem::replace(&mut self.engine, EngineSlot::Released) {
            EngineSlot::Ready(mut engine) => {
                info!("Releasing playback engine");
                if let Err(e) = engine.release() {
                    warn!(error = %e, "Engine release failed");
                    return Err(e.into());
                }
                Ok(())
            }
            EngineSlot::Uninitialized(_) => {
                debug!("Shutdown before initialize, engine never prepared");
                Ok(())
            }
            EngineSlot::Released => Ok(()),
        }
    }

    pub fn into_registry(self) -> VideoRegistry {
        self.registry
    }

    fn ready_engine(&mut self, operation: &'static str) -> Result<&mut E, SessionError> {
        let phase = self.phase();
        match &mut self.engine {
            EngineSlot::Ready(engine) => Ok(engine),
            _ => Err(SessionError::invalid_lifecycle(operation, phase)),
        }
    }
}
