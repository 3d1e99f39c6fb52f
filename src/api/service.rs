use std::fmt;

use async_trait::async_trait;

use super::types::MessagesQuery;
use crate::core::message::{Auth, Message};
use crate::core::narrow::Narrow;

/// Anchor that asks the server for the newest messages.
pub const LAST_MESSAGE_ANCHOR: u64 = 10_000_000_000_000_000;

/// How many results a search fetches.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Errors that can occur talking to the chat server.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server rejected the request, either by status or by `"result": "error"`.
    Api { status: u16, message: String },
    /// Response body was not what we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Authenticated server calls the action handlers rely on.
#[async_trait]
pub trait MessageApi: Send + Sync {
    /// Fetches the raw (markdown) source of a sent message.
    async fn get_message_content(&self, auth: &Auth, message_id: u64) -> Result<String, ApiError>;

    async fn delete_message(&self, auth: &Auth, message_id: u64) -> Result<(), ApiError>;

    async fn mute_topic(&self, auth: &Auth, stream: &str, topic: &str) -> Result<(), ApiError>;

    async fn unmute_topic(&self, auth: &Auth, stream: &str, topic: &str) -> Result<(), ApiError>;

    async fn toggle_mute_stream(&self, auth: &Auth, stream_id: u64, muted: bool) -> Result<(), ApiError>;

    async fn toggle_message_starred(
        &self,
        auth: &Auth,
        message_ids: &[u64],
        starred: bool,
    ) -> Result<(), ApiError>;

    async fn get_messages(&self, auth: &Auth, query: &MessagesQuery) -> Result<Vec<Message>, ApiError>;
}

/// The newest messages matching a full-text search.
pub async fn search_messages(
    api: &dyn MessageApi,
    auth: &Auth,
    query: &str,
) -> Result<Vec<Message>, ApiError> {
    let query = MessagesQuery {
        narrow: Narrow::Search {
            query: query.to_string(),
        },
        anchor: LAST_MESSAGE_ANCHOR,
        num_before: SEARCH_PAGE_SIZE,
        num_after: 0,
        use_first_unread_anchor: false,
    };
    api.get_messages(auth, &query).await
}
