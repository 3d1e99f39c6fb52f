//! # Session Snapshot Types
//!
//! The read-only state an action sheet is built from: the message itself,
//! who is looking at it, and the bits of session state (stars, mutes,
//! subscriptions) that change which actions make sense.
//!
//! ```text
//! Message
//! ├── id: u64                    // server id (local id for outbox)
//! ├── origin: Origin             // Sent | Outbox { markdown_content }
//! ├── sender_email: String
//! ├── recipient: Recipient       // Stream { name } | Private { participants }
//! ├── subject: String            // topic
//! ├── content: String            // rendered HTML
//! └── timestamp: i64
//! ```
//!
//! Field names follow the server's message JSON so the same type
//! deserializes both API responses and locally saved snapshots.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rendered content the server substitutes for a deleted message.
pub const DELETED_CONTENT: &str = "<p>(deleted)</p>";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// Persisted by the server.
    #[default]
    Sent,
    /// Composed locally and not yet confirmed. Only the source text is known.
    Outbox { markdown_content: String },
}

/// One participant of a direct conversation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PmRecipient {
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

/// Where a message lives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recipient {
    Stream {
        #[serde(rename = "display_recipient")]
        name: String,
    },
    Private {
        #[serde(rename = "display_recipient")]
        participants: Vec<PmRecipient>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    #[serde(default)]
    pub origin: Origin,
    pub sender_email: String,
    #[serde(flatten)]
    pub recipient: Recipient,
    #[serde(default)]
    pub subject: String,
    pub content: String,
    pub timestamp: i64,
}

impl Message {
    pub fn is_outbox(&self) -> bool {
        matches!(self.origin, Origin::Outbox { .. })
    }

    pub fn is_deleted(&self) -> bool {
        self.content == DELETED_CONTENT
    }

    /// Stream name for stream messages, `None` for direct messages.
    pub fn stream_name(&self) -> Option<&str> {
        match &self.recipient {
            Recipient::Stream { name } => Some(name),
            Recipient::Private { .. } => None,
        }
    }

    /// The locally held source text of an outbox message.
    pub fn outbox_source(&self) -> Option<&str> {
        match &self.origin {
            Origin::Outbox { markdown_content } => Some(markdown_content),
            Origin::Sent => None,
        }
    }
}

/// Credentials of the current user.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Auth {
    pub realm: String,
    pub email: String,
    pub api_key: String,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("realm", &self.realm)
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub name: String,
    pub stream_id: u64,
    /// False when the stream is muted (hidden from the home view).
    pub in_home_view: bool,
}

/// Finds the subscription for a stream by name.
pub fn find_subscription<'a>(subscriptions: &'a [Subscription], name: &str) -> Option<&'a Subscription> {
    subscriptions.iter().find(|sub| sub.name == name)
}

/// Per-message flags the menus care about.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    #[serde(default)]
    pub starred: HashSet<u64>,
}

impl Flags {
    pub fn is_starred(&self, message_id: u64) -> bool {
        self.starred.contains(&message_id)
    }
}

/// A muted `(stream, topic)` pair. Serialized as a two-element array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MuteTuple(pub String, pub String);

pub fn is_topic_muted(stream: &str, topic: &str, mute: &[MuteTuple]) -> bool {
    mute.iter().any(|MuteTuple(s, t)| s == stream && t == topic)
}
