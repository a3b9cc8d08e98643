use tracing::{debug, trace};

use crate::engine::PlaybackEngine;
use crate::error::SessionError;
use crate::events::{LifecycleHub, Subscription};
use crate::ops::coordinator::PlaybackCoordinator;
use crate::types::lifecycle::{LifecycleEvent, PlaybackTransition};

/// Forwards the playback-relevant part of the host lifecycle to a coordinator.
///
/// Only pause and resume get through, each once per transition: a repeat of
/// the last forwarded transition is dropped, and so is every other event.
#[derive(Default)]
pub struct LifecycleBridge {
    subscription: Option<Subscription>,
    last: Option<PlaybackTransition>,
}

impl LifecycleBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, hub: &mut LifecycleHub) {
        if self.subscription.is_none() {
            self.subscription = Some(hub.subscribe());
        }
    }

    /// Stop listening. Events emitted afterwards never reach the coordinator.
    pub fn detach(&mut self, hub: &mut LifecycleHub) {
        if let Some(subscription) = self.subscription.take() {
            hub.unsubscribe(subscription.id);
            debug!(id = %subscription.id, "Lifecycle bridge detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Translate one event. Returns whether the coordinator was called.
    pub fn forward<E: PlaybackEngine>(
        &mut self,
        event: LifecycleEvent,
        coordinator: &mut PlaybackCoordinator<E>,
    ) -> Result<bool, SessionError> {
        let Some(transition) = event.playback_transition() else {
            trace!(%event, "Lifecycle event ignored");
            return Ok(false);
        };
        if self.last == Some(transition) {
            trace!(%event, "Repeated lifecycle transition dropped");
            return Ok(false);
        }
        match transition {
            PlaybackTransition::Backgrounded => coordinator.on_lifecycle_pause()?,
            PlaybackTransition::Foregrounded => coordinator.on_lifecycle_resume()?,
        }
        self.last = Some(transition);
        Ok(true)
    }

    /// Forward pending events one at a time. Returns the number forwarded.
    ///
    /// Stops at the first failure; events behind it stay queued for the next call.
    pub fn pump<E: PlaybackEngine>(
        &mut self,
        coordinator: &mut PlaybackCoordinator<E>,
    ) -> Result<usize, SessionError> {
        let mut forwarded = 0;
        while let Some(event) = self.next_pending() {
            if self.forward(event, coordinator)? {
                forwarded += 1;
            }
        }
        Ok(forwarded)
    }

    fn next_pending(&self) -> Option<LifecycleEvent> {
        self.subscription
            .as_ref()
            .and_then(|subscription| subscription.events.try_recv().ok())
    }
}
