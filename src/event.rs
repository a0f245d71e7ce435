//! Domain events and the closed topic set.
//!
//! Topics are known at compile time — an event belongs to exactly one topic
//! and carries that topic's fixed payload shape. Because `ChatEvent` is an
//! enum, publishing to an undeclared topic is unrepresentable rather than a
//! runtime condition to recover from.

use serde::{Deserialize, Serialize};

/// A named category of event with a fixed payload shape.
///
/// The set is closed: adding a topic means adding a variant here and a
/// corresponding `ChatEvent` variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Message,
    Question,
}

impl Topic {
    /// All declared topics, in catalog order.
    pub const ALL: [Topic; 2] = [Topic::Message, Topic::Question];

    /// Wire name of the topic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Message => "message",
            Topic::Question => "question",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload shared by the `message` and `question` topics.
///
/// Field names serialize in camelCase to match the wire catalog
/// (`channelId`, `userId`, `nickname`, `content`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Channel the message was posted in.
    pub channel_id: String,
    /// Author's user id.
    pub user_id: String,
    /// Author's display name.
    pub nickname: String,
    /// Message body.
    pub content: String,
}

impl ChatMessage {
    pub fn new(
        channel_id: impl Into<String>,
        user_id: impl Into<String>,
        nickname: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            nickname: nickname.into(),
            content: content.into(),
        }
    }
}

/// An immutable tagged event value — one variant per topic.
///
/// Serializes as `{"topic": "message", "payload": {...}}`, which is also the
/// frame shape the WebSocket adapter sends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "payload", rename_all = "lowercase")]
pub enum ChatEvent {
    Message(ChatMessage),
    Question(ChatMessage),
}

impl ChatEvent {
    /// The topic this event belongs to.
    pub fn topic(&self) -> Topic {
        match self {
            ChatEvent::Message(_) => Topic::Message,
            ChatEvent::Question(_) => Topic::Question,
        }
    }

    /// The payload record, regardless of topic.
    pub fn payload(&self) -> &ChatMessage {
        match self {
            ChatEvent::Message(m) | ChatEvent::Question(m) => m,
        }
    }
}
