use crossbeam_channel::{Receiver, Sender, unbounded};
use uuid::Uuid;

use crate::types::lifecycle::LifecycleEvent;

/// A live subscription to lifecycle events. Dropping it disconnects the
/// channel; the hub prunes it on the next emit.
pub struct Subscription {
    pub id: Uuid,
    pub events: Receiver<LifecycleEvent>,
}

/// Host-side lifecycle event source. The platform shell calls [`emit`](Self::emit)
/// for every transition it observes.
#[derive(Default)]
pub struct LifecycleHub {
    subscribers: Vec<(Uuid, Sender<LifecycleEvent>)>,
}

impl LifecycleHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = unbounded();
        let id = Uuid::new_v4();
        self.subscribers.push((id, tx));
        tracing::debug!(%id, "Lifecycle subscriber added");
        Subscription { id, events: rx }
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: Uuid) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }

    pub fn emit(&mut self, event: LifecycleEvent) {
        self.subscribers.retain(|(id, tx)| {
            let alive = tx.send(event).is_ok();
            if !alive {
                tracing::debug!(%id, "Dropping disconnected lifecycle subscriber");
            }
            alive
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let mut hub = LifecycleHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();
        hub.emit(LifecycleEvent::Pause);
        assert_eq!(first.events.try_recv().unwrap(), LifecycleEvent::Pause);
        assert_eq!(second.events.try_recv().unwrap(), LifecycleEvent::Pause);
    }

    #[test]
    fn test_unsubscribe() {
        let mut hub = LifecycleHub::new();
        let sub = hub.subscribe();
        assert!(hub.unsubscribe(sub.id));
        assert!(!hub.unsubscribe(sub.id));
        hub.emit(LifecycleEvent::Resume);
        assert!(sub.events.try_recv().is_err());
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let mut hub = LifecycleHub::new();
        let sub = hub.subscribe();
        drop(sub);
        assert_eq!(hub.subscriber_count(), 1);
        hub.emit(LifecycleEvent::Stop);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
