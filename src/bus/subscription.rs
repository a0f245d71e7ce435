//! Cancellable handle to one registered listener.

use std::sync::Arc;

use crate::event::Topic;

use super::event_bus::Inner;

/// Handle returned by [`EventBus::subscribe`](super::EventBus::subscribe).
///
/// `cancel` removes the listener for all publishes that have not yet
/// snapshotted the listener list; a publish already iterating may still
/// invoke it once. Dropping the handle without cancelling leaves the
/// listener registered — lifecycle is explicit, and connection-scoped
/// listeners are owned by a [`QueueBinding`](super::QueueBinding) which
/// cancels on close.
pub struct Subscription {
    bus: Arc<Inner>,
    topic: Topic,
    id: u64,
}

impl Subscription {
    pub(super) fn new(bus: Arc<Inner>, topic: Topic, id: u64) -> Self {
        Self { bus, topic, id }
    }

    /// The topic this subscription listens on.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Remove the listener from the bus. Idempotent.
    pub fn cancel(&self) {
        self.bus.remove(self.topic, self.id);
    }
}
