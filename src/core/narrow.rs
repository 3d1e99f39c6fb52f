//! # Narrows
//!
//! A narrow is the scope of messages the user is currently looking at.
//! The action sheet only needs two questions answered about it: is this the
//! home view, and is it one of the special aggregate views. Everything else
//! is a specific conversation.

use serde::{Deserialize, Serialize};

use crate::core::message::{Message, Recipient};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Narrow {
    /// All messages.
    #[default]
    Home,
    Stream { stream: String },
    Topic { stream: String, topic: String },
    /// One-on-one direct conversation.
    Private { email: String },
    /// Group direct conversation, excluding self.
    Group { emails: Vec<String> },
    Starred,
    Mentioned,
    AllPrivate,
    Search { query: String },
}

/// A single `{operator, operand}` term of the server's narrow syntax.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NarrowTerm {
    pub operator: String,
    pub operand: String,
}

impl NarrowTerm {
    fn new(operator: &str, operand: impl Into<String>) -> Self {
        Self {
            operator: operator.to_string(),
            operand: operand.into(),
        }
    }
}

impl Narrow {
    pub fn is_home(&self) -> bool {
        matches!(self, Narrow::Home)
    }

    /// Aggregate views that cut across conversations.
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            Narrow::Starred | Narrow::Mentioned | Narrow::AllPrivate | Narrow::Search { .. }
        )
    }

    /// Builds a private narrow for one email and a group narrow otherwise.
    pub fn private_or_group(emails: Vec<String>) -> Self {
        match <[String; 1]>::try_from(emails) {
            Ok([email]) => Narrow::Private { email },
            Err(emails) => Narrow::Group { emails },
        }
    }

    /// Converts to the server's operator list.
    pub fn to_terms(&self) -> Vec<NarrowTerm> {
        match self {
            Narrow::Home => Vec::new(),
            Narrow::Stream { stream } => vec![NarrowTerm::new("stream", stream.clone())],
            Narrow::Topic { stream, topic } => vec![
                NarrowTerm::new("stream", stream.clone()),
                NarrowTerm::new("topic", topic.clone()),
            ],
            Narrow::Private { email } => vec![NarrowTerm::new("pm-with", email.clone())],
            Narrow::Group { emails } => vec![NarrowTerm::new("pm-with", emails.join(","))],
            Narrow::Starred => vec![NarrowTerm::new("is", "starred")],
            Narrow::Mentioned => vec![NarrowTerm::new("is", "mentioned")],
            Narrow::AllPrivate => vec![NarrowTerm::new("is", "private")],
            Narrow::Search { query } => vec![NarrowTerm::new("search", query.clone())],
        }
    }
}

/// The conversation a message belongs to, as seen by `own_email`.
///
/// Direct messages drop self from the participant list unless self is the
/// only participant. Stream messages without a topic narrow to the stream.
pub fn narrow_from_message(message: &Message, own_email: &str) -> Narrow {
    match &message.recipient {
        Recipient::Private { participants } => {
            let emails: Vec<String> = if participants.len() > 1 {
                participants
                    .iter()
                    .filter(|p| p.email != own_email)
                    .map(|p| p.email.clone())
                    .collect()
            } else {
                participants.iter().map(|p| p.email.clone()).collect()
            };
            Narrow::private_or_group(emails)
        }
        Recipient::Stream { name } if !message.subject.is_empty() => Narrow::Topic {
            stream: name.clone(),
            topic: message.subject.clone(),
        },
        Recipient::Stream { name } => Narrow::Stream { stream: name.clone() },
    }
}
