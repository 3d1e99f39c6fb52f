//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::api::{ApiError, MessageApi, MessagesQuery};
use crate::core::action::{Intent, Route};
use crate::core::handlers::ActionParams;
use crate::core::localize::English;
use crate::core::menu::MenuContext;
use crate::core::message::{Auth, Flags, Message, MuteTuple, Origin, PmRecipient, Recipient, Subscription};
use crate::core::narrow::Narrow;
use crate::platform::Platform;

pub const SELF_EMAIL: &str = "me@example.com";
pub const OTHER_EMAIL: &str = "iago@example.com";

pub fn self_auth() -> Auth {
    Auth {
        realm: "https://chat.example.com".to_string(),
        email: SELF_EMAIL.to_string(),
        api_key: "test-key".to_string(),
    }
}

pub fn topic_narrow() -> Narrow {
    Narrow::Topic {
        stream: "general".to_string(),
        topic: "lunch".to_string(),
    }
}

/// A sent stream message from someone else.
pub fn stream_message(stream: &str, topic: &str) -> Message {
    Message {
        id: 100,
        origin: Origin::Sent,
        sender_email: OTHER_EMAIL.to_string(),
        recipient: Recipient::Stream {
            name: stream.to_string(),
        },
        subject: topic.to_string(),
        content: "<p>Hello <b>there</b></p>".to_string(),
        timestamp: 1_500_000_000,
    }
}

pub fn other_message() -> Message {
    stream_message("general", "lunch")
}

pub fn own_message() -> Message {
    Message {
        id: 101,
        sender_email: SELF_EMAIL.to_string(),
        ..stream_message("general", "lunch")
    }
}

/// An unsent message of our own. Its id is its local timestamp.
pub fn outbox_message(source: &str) -> Message {
    Message {
        id: 1_500_000_123,
        origin: Origin::Outbox {
            markdown_content: source.to_string(),
        },
        sender_email: SELF_EMAIL.to_string(),
        content: format!("<p>{source}</p>"),
        timestamp: 1_500_000_123,
        ..stream_message("general", "lunch")
    }
}

pub fn private_message(emails: &[&str]) -> Message {
    Message {
        id: 102,
        recipient: Recipient::Private {
            participants: emails
                .iter()
                .map(|email| PmRecipient {
                    email: email.to_string(),
                    full_name: String::new(),
                })
                .collect(),
        },
        subject: String::new(),
        ..stream_message("general", "lunch")
    }
}

/// Owned session state a `MenuContext` can borrow from.
pub struct Snapshot {
    pub message: Message,
    pub auth: Auth,
    pub narrow: Narrow,
    pub flags: Flags,
    pub subscriptions: Vec<Subscription>,
    pub mute: Vec<MuteTuple>,
}

impl Snapshot {
    /// Viewed in the general/lunch topic, subscribed to general, nothing
    /// starred or muted.
    pub fn new(message: Message) -> Self {
        Self {
            message,
            auth: self_auth(),
            narrow: topic_narrow(),
            flags: Flags::default(),
            subscriptions: vec![Subscription {
                name: "general".to_string(),
                stream_id: 1,
                in_home_view: true,
            }],
            mute: Vec::new(),
        }
    }

    pub fn context(&self) -> MenuContext<'_> {
        MenuContext {
            message: &self.message,
            auth: &self.auth,
            narrow: &self.narrow,
            flags: &self.flags,
            subscriptions: &self.subscriptions,
            mute: &self.mute,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetMessageContent(u64),
    DeleteMessage(u64),
    MuteTopic(String, String),
    UnmuteTopic(String, String),
    ToggleMuteStream(u64, bool),
    ToggleStarred(Vec<u64>, bool),
    GetMessages(Narrow),
}

/// Records every call; can be told to fail the next one.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    raw_content: Mutex<String>,
    fail_next: AtomicBool,
}

impl RecordingApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_raw_content(&self, content: &str) {
        *self.raw_content.lock().unwrap() = content.to_string();
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl MessageApi for RecordingApi {
    async fn get_message_content(&self, _auth: &Auth, message_id: u64) -> Result<String, ApiError> {
        self.record(ApiCall::GetMessageContent(message_id))?;
        Ok(self.raw_content.lock().unwrap().clone())
    }

    async fn delete_message(&self, _auth: &Auth, message_id: u64) -> Result<(), ApiError> {
        self.record(ApiCall::DeleteMessage(message_id))
    }

    async fn mute_topic(&self, _auth: &Auth, stream: &str, topic: &str) -> Result<(), ApiError> {
        self.record(ApiCall::MuteTopic(stream.to_string(), topic.to_string()))
    }

    async fn unmute_topic(&self, _auth: &Auth, stream: &str, topic: &str) -> Result<(), ApiError> {
        self.record(ApiCall::UnmuteTopic(stream.to_string(), topic.to_string()))
    }

    async fn toggle_mute_stream(&self, _auth: &Auth, stream_id: u64, muted: bool) -> Result<(), ApiError> {
        self.record(ApiCall::ToggleMuteStream(stream_id, muted))
    }

    async fn toggle_message_starred(
        &self,
        _auth: &Auth,
        message_ids: &[u64],
        starred: bool,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::ToggleStarred(message_ids.to_vec(), starred))
    }

    async fn get_messages(&self, _auth: &Auth, query: &MessagesQuery) -> Result<Vec<Message>, ApiError> {
        self.record(ApiCall::GetMessages(query.narrow.clone()))?;
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub struct RecordingPlatform {
    clipboard: Mutex<Vec<String>>,
    shared: Mutex<Vec<String>>,
    toasts: Mutex<Vec<String>>,
}

impl RecordingPlatform {
    pub fn clipboard(&self) -> Vec<String> {
        self.clipboard.lock().unwrap().clone()
    }

    pub fn shared(&self) -> Vec<String> {
        self.shared.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Platform for RecordingPlatform {
    fn set_clipboard(&self, text: &str) {
        self.clipboard.lock().unwrap().push(text.to_string());
    }

    fn share(&self, text: &str) {
        self.shared.lock().unwrap().push(text.to_string());
    }

    fn show_toast(&self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_string());
    }
}

/// `ActionParams` wired to recording collaborators.
pub struct Harness {
    pub params: ActionParams,
    pub api: Arc<RecordingApi>,
    pub platform: Arc<RecordingPlatform>,
    intents: Mutex<UnboundedReceiver<Intent>>,
}

impl Harness {
    pub fn new(message: Message) -> Self {
        let api = Arc::new(RecordingApi::default());
        let platform = Arc::new(RecordingPlatform::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let snapshot = Snapshot::new(message);
        let params = ActionParams {
            auth: snapshot.auth,
            message: snapshot.message,
            subscriptions: snapshot.subscriptions,
            dispatch: tx,
            current_route: Route::Chat,
            on_reply_select: None,
            localizer: Arc::new(English),
            api: api.clone(),
            platform: platform.clone(),
        };
        Self {
            params,
            api,
            platform,
            intents: Mutex::new(rx),
        }
    }

    /// Drains the intents emitted so far.
    pub fn intents(&self) -> Vec<Intent> {
        let mut rx = self.intents.lock().unwrap();
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    pub fn close_sink(&mut self) {
        self.intents.get_mut().unwrap().close();
    }
}
