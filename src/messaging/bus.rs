/// Event bus for wizard state changes
///
/// The controller publishes every change here and views subscribe to render
/// them. Each subscriber gets its own unbounded channel, so publishing never
/// blocks the wizard loop.
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::events::WizardEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<WizardEvent>,
}

/// Broadcasts wizard events. Clones share one subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    next_id: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<WizardEvent>, SubscriberId) {
        let (tx, rx) = unbounded();
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.subscribers.write().push(Subscriber { id, sender: tx });
        tracing::debug!(target: "pairing_wizard::bus", "Subscriber {:?} added", id);

        (rx, id)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Deliver `event` to every live subscriber. Subscribers whose receiver
    /// was dropped are removed.
    pub fn publish(&self, event: WizardEvent) {
        tracing::trace!(target: "pairing_wizard::bus", "{}", event.description());

        self.subscribers
            .write()
            .retain(|s| s.sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}
