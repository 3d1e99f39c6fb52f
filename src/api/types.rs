//! Wire types for the chat server's REST API.

use serde::{Deserialize, Serialize};

use crate::core::message::Message;
use crate::core::narrow::Narrow;

/// Envelope every response carries.
#[derive(Deserialize, Debug)]
pub struct ApiResponse {
    pub result: String,
    #[serde(default)]
    pub msg: String,
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        self.result == "error"
    }
}

#[derive(Deserialize, Debug)]
pub struct RawContentResponse {
    pub raw_content: String,
}

#[derive(Deserialize, Debug)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

/// One entry of `subscription_data` for the subscription properties endpoint.
#[derive(Serialize, Debug)]
pub struct SubscriptionProperty {
    pub stream_id: u64,
    pub property: &'static str,
    pub value: bool,
}

/// Parameters of a message fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesQuery {
    pub narrow: Narrow,
    pub anchor: u64,
    pub num_before: u32,
    pub num_after: u32,
    pub use_first_unread_anchor: bool,
}

/// Add-or-remove operation name used by several endpoints.
pub fn op(add: bool) -> &'static str {
    if add { "add" } else { "remove" }
}
