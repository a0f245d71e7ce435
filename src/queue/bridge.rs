//! The rendezvous queue itself.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use super::RecvError;

/// Internal state — guarded by one mutex so `enqueue` and `dequeue`
/// registration interleave atomically.
///
/// Invariant: at most one of `buffer` / `waiters` holds anything live at any
/// instant. An item meets a waiter immediately or is buffered; a consumer
/// takes a buffered item immediately or becomes a waiter. A waiter whose
/// receiving future was dropped is dead weight and is skipped at hand-off.
struct State<T> {
    buffer: VecDeque<T>,
    waiters: VecDeque<oneshot::Sender<T>>,
    closed: bool,
}

/// Per-subscriber queue bridging push callbacks into an async pull sequence.
///
/// Cloning produces another handle to the same queue, so the producer-facing
/// side (bus listener) and consumer-facing side (transport loop) can live on
/// different tasks.
///
/// The buffer is unbounded — a producer faster than its consumer grows memory
/// without limit. Bounding or other backpressure is a policy to layer above
/// this primitive, not built into it.
///
/// ## Example
///
/// ```
/// use event_bridge::BridgeQueue;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let queue = BridgeQueue::new();
///
/// queue.enqueue("hello");
/// let item = rt.block_on(queue.dequeue()).unwrap();
/// assert_eq!(item, "hello");
/// ```
pub struct BridgeQueue<T> {
    inner: Arc<Mutex<State<T>>>,
}

// Manual impl: a handle is clonable whether or not T is.
impl<T> Clone for BridgeQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for BridgeQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BridgeQueue<T> {
    /// Create a new, open, empty queue.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                buffer: VecDeque::new(),
                waiters: VecDeque::new(),
                closed: false,
            })),
        }
    }

    /// Hand `item` to the oldest live waiter, or buffer it.
    ///
    /// Never fails and never suspends; returns in bounded time regardless of
    /// how many waiters exist. After [`close`](Self::close) the item is
    /// silently dropped — the owning connection is already gone.
    pub fn enqueue(&self, item: T) {
        let mut state = self.inner.lock().unwrap();
        if state.closed {
            return;
        }

        let mut item = item;
        while let Some(waiter) = state.waiters.pop_front() {
            match waiter.send(item) {
                Ok(()) => return,
                // Waiter's future was dropped; try the next one.
                Err(returned) => item = returned,
            }
        }
        state.buffer.push_back(item);
    }

    /// Take the oldest buffered item, suspending until one arrives.
    ///
    /// Returns immediately when the buffer is non-empty. Otherwise registers
    /// at the tail of the waiter list and suspends — unboundedly, unless the
    /// caller races it against a timeout — until an `enqueue` fulfills it or
    /// the queue closes. Waiters are satisfied strictly in registration
    /// order.
    ///
    /// # Errors
    ///
    /// [`RecvError::Closed`] when the queue is closed and nothing is
    /// buffered; this is the cancellation signal, not a failure.
    pub async fn dequeue(&self) -> Result<T, RecvError> {
        let rx = {
            let mut state = self.inner.lock().unwrap();
            if let Some(item) = state.buffer.pop_front() {
                return Ok(item);
            }
            if state.closed {
                return Err(RecvError::Closed);
            }
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            rx
        };

        // Lock released before suspension; the sender side is the only
        // path that resolves this receiver.
        rx.await.map_err(|_| RecvError::Closed)
    }

    /// Close the queue: discard buffered items and release every pending
    /// waiter with [`RecvError::Closed`].
    ///
    /// Idempotent. Subsequent `enqueue` calls are dropped and subsequent
    /// `dequeue` calls return `Closed` without suspending.
    pub fn close(&self) {
        let mut state = self.inner.lock().unwrap();
        state.closed = true;
        state.buffer.clear();
        // Dropping the senders wakes each receiver with a recv error,
        // surfaced to callers as Closed.
        state.waiters.clear();
    }

    /// Number of buffered (produced but unconsumed) items.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().buffer.is_empty()
    }

    /// Whether the queue has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }
}
