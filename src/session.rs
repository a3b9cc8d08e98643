use tracing::info;

use crate::engine::PlaybackEngine;
use crate::error::SessionError;
use crate::events::LifecycleHub;
use crate::ops::coordinator::PlaybackCoordinator;
use crate::ops::lifecycle_bridge::LifecycleBridge;
use crate::types::handle::StorageHandle;
use crate::types::session::SessionState;
use crate::types::video_item::VideoItem;

/// One lifetime of the video session manager: engine prepared and lifecycle
/// bridge attached on start, both torn down on end.
pub struct VideoSession<E: PlaybackEngine> {
    coordinator: PlaybackCoordinator<E>,
    bridge: LifecycleBridge,
}

impl<E: PlaybackEngine> VideoSession<E> {
    pub fn start(
        mut coordinator: PlaybackCoordinator<E>,
        hub: &mut LifecycleHub,
    ) -> Result<Self, SessionError> {
        coordinator.initialize()?;
        let mut bridge = LifecycleBridge::new();
        bridge.attach(hub);
        info!(items = coordinator.registry().len(), "Video session started");
        Ok(VideoSession {
            coordinator,
            bridge,
        })
    }

    pub fn add_handle(&mut self, handle: StorageHandle) -> Result<(), SessionError> {
        self.coordinator.add_handle(handle)
    }

    pub fn select(&mut self, handle: &StorageHandle) -> Result<bool, SessionError> {
        self.coordinator.select(handle)
    }

    pub fn items(&self) -> Vec<VideoItem> {
        self.coordinator.items()
    }

    /// Forward whatever lifecycle events arrived since the last call.
    pub fn pump_lifecycle(&mut self) -> Result<usize, SessionError> {
        self.bridge.pump(&mut self.coordinator)
    }

    pub fn coordinator(&self) -> &PlaybackCoordinator<E> {
        &self.coordinator
    }

    /// Detach from the lifecycle source, then release the engine, and hand the
    /// handle list back to the caller.
    pub fn end(mut self, hub: &mut LifecycleHub) -> Result<SessionState, SessionError> {
        self.bridge.detach(hub);
        self.coordinator.shutdown()?;
        info!("Video session ended");
        Ok(self.coordinator.into_registry().into_state())
    }
}
