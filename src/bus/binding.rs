//! Subscriber binding: one queue, one or more topics, one teardown.

use crate::event::ChatEvent;
use crate::queue::BridgeQueue;

use super::Subscription;

/// Association between one [`BridgeQueue`] and its bus subscriptions.
///
/// Created when a transport connection opens
/// ([`EventBus::bind_queue`](super::EventBus::bind_queue)) and torn down when
/// it closes or errors. [`close`](Self::close) runs the full cancellation
/// sequence: cancel every subscription so no further enqueues occur, then
/// close the queue so a pending consumer is released with a cancellation
/// signal instead of suspending forever. Buffered-but-undelivered items are
/// discarded; nothing survives reconnection.
///
/// Dropping the binding closes it, so an adapter bailing out on an error
/// path cannot leak a dangling listener or a never-resumed consumer.
pub struct QueueBinding {
    subscriptions: Vec<Subscription>,
    queue: BridgeQueue<ChatEvent>,
}

impl QueueBinding {
    pub(super) fn new(subscriptions: Vec<Subscription>, queue: BridgeQueue<ChatEvent>) -> Self {
        Self {
            subscriptions,
            queue,
        }
    }

    /// The bound queue.
    pub fn queue(&self) -> &BridgeQueue<ChatEvent> {
        &self.queue
    }

    /// Cancel the bus subscriptions, then close the queue. Idempotent.
    pub fn close(&self) {
        for subscription in &self.subscriptions {
            subscription.cancel();
        }
        self.queue.close();
    }
}

impl Drop for QueueBinding {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::event::{ChatMessage, Topic};
    use crate::queue::RecvError;

    #[tokio::test]
    async fn close_releases_a_pending_consumer() {
        let bus = EventBus::new();
        let queue = BridgeQueue::new();
        let binding = bus.bind_queue(&[Topic::Message], queue.clone());

        let consumer = {
            let q = queue.clone();
            tokio::spawn(async move { q.dequeue().await })
        };
        tokio::task::yield_now().await;

        binding.close();
        assert_eq!(consumer.await.unwrap(), Err(RecvError::Closed));

        // No further enqueues reach the queue.
        bus.publish(ChatEvent::Message(ChatMessage::new("c1", "u1", "A", "late")));
        assert_eq!(queue.len(), 0);
    }

    #[tokio::test]
    async fn dropping_the_binding_tears_down() {
        let bus = EventBus::new();
        let queue = BridgeQueue::new();
        {
            let _binding = bus.bind_queue(&[Topic::Message], queue.clone());
            assert_eq!(bus.listener_count(Topic::Message), 1);
        }
        assert_eq!(bus.listener_count(Topic::Message), 0);
        assert!(queue.is_closed());
    }
}
