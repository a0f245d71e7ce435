//! The bus itself: listener registry and synchronous fan-out.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::event::{ChatEvent, Topic};
use crate::queue::BridgeQueue;

use super::{QueueBinding, Subscription};

/// A registered listener callback.
pub(super) type ListenerFn = dyn Fn(ChatEvent) + Send + Sync;

struct Registered {
    id: u64,
    listener: Arc<ListenerFn>,
}

pub(super) struct Inner {
    listeners: RwLock<HashMap<Topic, Vec<Registered>>>,
    next_id: AtomicU64,
}

impl Inner {
    pub(super) fn remove(&self, topic: Topic, id: u64) {
        let mut listeners = self.listeners.write().unwrap();
        if let Some(registered) = listeners.get_mut(&topic) {
            registered.retain(|r| r.id != id);
        }
    }
}

/// Process-wide publish point with per-topic fan-out.
///
/// Cloning produces another handle to the same bus, which is how the bus is
/// injected into publishers (request handlers) and subscribers (transport
/// connections) alike.
///
/// ## Example
///
/// ```
/// use event_bridge::{ChatEvent, ChatMessage, EventBus, Topic};
///
/// let bus = EventBus::new();
/// let sub = bus.subscribe(Topic::Message, |event| {
///     println!("saw {:?}", event.payload().content);
/// });
///
/// bus.publish(ChatEvent::Message(ChatMessage::new("c1", "u1", "Alice", "hi")));
/// sub.cancel();
/// ```
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create a new bus with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                listeners: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Deliver `event` to every listener of its topic before returning.
    ///
    /// Listeners run synchronously in registration order. A listener that
    /// panics is isolated — logged and skipped — and affects neither the
    /// remaining listeners nor future publishes. The listener list is
    /// snapshotted up front, so a `cancel` racing this call may still be
    /// invoked for this one publish.
    pub fn publish(&self, event: ChatEvent) {
        let topic = event.topic();
        let snapshot: Vec<Arc<ListenerFn>> = {
            let listeners = self.inner.listeners.read().unwrap();
            listeners
                .get(&topic)
                .map(|registered| registered.iter().map(|r| Arc::clone(&r.listener)).collect())
                .unwrap_or_default()
        };

        for listener in snapshot {
            let event = event.clone();
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                tracing::error!(%topic, "listener panicked during fan-out");
            }
        }
    }

    /// Register `listener` for `topic`; the returned handle's
    /// [`cancel`](Subscription::cancel) removes it.
    pub fn subscribe<F>(&self, topic: Topic, listener: F) -> Subscription
    where
        F: Fn(ChatEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let registered = Registered {
            id,
            listener: Arc::new(listener),
        };

        let mut listeners = self.inner.listeners.write().unwrap();
        listeners.entry(topic).or_default().push(registered);

        Subscription::new(Arc::clone(&self.inner), topic, id)
    }

    /// Attach `queue` to each of `topics` — every publish on any of them is
    /// enqueued — and return the binding that owns the teardown sequence.
    ///
    /// The binding is created when a transport connection opens and must not
    /// outlive it: [`QueueBinding::close`] cancels the subscriptions and then
    /// closes the queue, releasing any pending consumer.
    pub fn bind_queue(&self, topics: &[Topic], queue: BridgeQueue<ChatEvent>) -> QueueBinding {
        let subscriptions = topics
            .iter()
            .map(|&topic| {
                let q = queue.clone();
                self.subscribe(topic, move |event| q.enqueue(event))
            })
            .collect();
        QueueBinding::new(subscriptions, queue)
    }

    /// Number of listeners currently registered for `topic`.
    pub fn listener_count(&self, topic: Topic) -> usize {
        self.inner
            .listeners
            .read()
            .unwrap()
            .get(&topic)
            .map(Vec::len)
            .unwrap_or(0)
    }
}
