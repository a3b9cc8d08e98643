use std::fmt;

/// Coarse host lifecycle transitions, as reported by the windowing or mobile shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

/// The playback-relevant meaning of a lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTransition {
    Backgrounded,
    Foregrounded,
}

impl LifecycleEvent {
    pub fn playback_transition(self) -> Option<PlaybackTransition> {
        match self {
            LifecycleEvent::Pause => Some(PlaybackTransition::Backgrounded),
            LifecycleEvent::Resume => Some(PlaybackTransition::Foregrounded),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleEvent::Create => "create",
            LifecycleEvent::Start => "start",
            LifecycleEvent::Resume => "resume",
            LifecycleEvent::Pause => "pause",
            LifecycleEvent::Stop => "stop",
            LifecycleEvent::Destroy => "destroy",
        };
        f.write_str(name)
    }
}
