//! Event Bus — process-wide, multi-topic publish point.
//!
//! Producers publish typed events; the bus fans each event out to every
//! currently-subscribed listener of its topic, synchronously and in
//! registration order. Listeners never suspend the bus: the canonical
//! listener is a [`BridgeQueue`](crate::BridgeQueue) `enqueue`, which is
//! non-blocking by contract, and anything heavier spawns its own task.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     EventBus (one per process)            │
//! │  publish(event) ──► listeners[event.topic()], in order    │
//! │  subscribe(topic, f) ──► Subscription (cancel() removes)  │
//! │  bind_queue(topics, queue) ──► QueueBinding (close() =    │
//! │      cancel subscriptions + close queue)                  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The bus is constructed explicitly and cloned into whatever needs to
//! publish or subscribe — one bus per process by convention, not via a
//! hidden global.

mod binding;
mod event_bus;
mod subscription;

pub use binding::QueueBinding;
pub use event_bus::EventBus;
pub use subscription::Subscription;
