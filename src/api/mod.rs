pub mod client;
pub mod service;
pub mod types;

pub use client::ZulipClient;
pub use service::{ApiError, LAST_MESSAGE_ANCHOR, MessageApi, search_messages};
pub use types::MessagesQuery;
