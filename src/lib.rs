mod bus;
mod event;
mod queue;

pub use bus::{EventBus, QueueBinding, Subscription};
pub use event::{ChatEvent, ChatMessage, Topic};
pub use queue::{BridgeQueue, RecvError};

// WebSocket transport (requires "ws" feature)
#[cfg(feature = "ws")]
pub mod ws;
