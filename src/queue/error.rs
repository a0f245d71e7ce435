//! Error type for queue consumption.

use std::error::Error;
use std::fmt;

/// Error returned by [`BridgeQueue::dequeue`](super::BridgeQueue::dequeue).
///
/// The queue raises no errors in normal operation. `Closed` is a cancellation
/// signal — the owning connection shut the queue down while the caller was
/// waiting — so callers can tell "shutting down" apart from a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
    /// The queue was closed; no further items will arrive.
    Closed,
}

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecvError::Closed => write!(f, "queue closed while waiting for an item"),
        }
    }
}

impl Error for RecvError {}
