//! Bridge Queue — async rendezvous between push producers and pull consumers.
//!
//! A `BridgeQueue` converts synchronous push callbacks (bus fan-out) into an
//! ordered asynchronous pull sequence. It holds either buffered-but-unconsumed
//! items or pending consumer waiters — never both at once:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    BridgeQueue<T>                         │
//! │                                                           │
//! │  enqueue(item) ──┬─► oldest pending waiter (rendezvous)   │
//! │                  └─► FIFO buffer (no waiter)              │
//! │                                                           │
//! │  dequeue().await ┬─◄ oldest buffered item (no suspension) │
//! │                  └─◄ suspend until enqueue / close        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `enqueue` never fails and never suspends; `dequeue` suspends only when the
//! buffer is empty. Items reach consumers in exact enqueue order and waiters
//! are satisfied in the order they were registered.

mod bridge;
mod error;

pub use bridge::BridgeQueue;
pub use error::RecvError;
