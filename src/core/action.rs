//! # Actions and Intents
//!
//! Every entry of an action sheet is a symbolic action. The user picks
//! `MessageAction::Reply`; what they see is its localized title.
//! Selections resolve back to these keys, never to display text.
//!
//! What a handler asks the rest of the app to do becomes an `Intent`.
//! Intents flow out through an `IntentSender` and are applied elsewhere:
//!
//! ```text
//! ActionId  →  handler  →  Intent (app state)  +  MessageApi call (server)
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::narrow::Narrow;

/// Entries of the per-message sheet, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageAction {
    AddReaction,
    Reply,
    CopyToClipboard,
    Share,
    EditMessage,
    DeleteMessage,
    StarMessage,
    UnstarMessage,
    Cancel,
}

impl MessageAction {
    /// Canonical English title, also the localization key.
    pub const fn title(self) -> &'static str {
        match self {
            MessageAction::AddReaction => "Add a reaction",
            MessageAction::Reply => "Reply",
            MessageAction::CopyToClipboard => "Copy to clipboard",
            MessageAction::Share => "Share",
            MessageAction::EditMessage => "Edit message",
            MessageAction::DeleteMessage => "Delete message",
            MessageAction::StarMessage => "Star message",
            MessageAction::UnstarMessage => "Unstar message",
            MessageAction::Cancel => "Cancel",
        }
    }
}

/// Entries of the per-header (topic / stream) sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderAction {
    UnmuteTopic,
    MuteTopic,
    MuteStream,
    UnmuteStream,
    Cancel,
}

impl HeaderAction {
    pub const fn title(self) -> &'static str {
        match self {
            HeaderAction::UnmuteTopic => "Unmute topic",
            HeaderAction::MuteTopic => "Mute topic",
            HeaderAction::MuteStream => "Mute stream",
            HeaderAction::UnmuteStream => "Unmute stream",
            HeaderAction::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Message(MessageAction),
    Header(HeaderAction),
}

impl ActionId {
    pub const fn title(self) -> &'static str {
        match self {
            ActionId::Message(action) => action.title(),
            ActionId::Header(action) => action.title(),
        }
    }

    pub fn is_cancel(self) -> bool {
        matches!(
            self,
            ActionId::Message(MessageAction::Cancel) | ActionId::Header(HeaderAction::Cancel)
        )
    }
}

/// Localization key of the toast shown after copying.
pub const MESSAGE_COPIED: &str = "Message copied";

/// The screen the user is on when the sheet was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    Main,
    Chat,
    Search,
}

/// State changes requested of the app. Applied by whoever owns the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    NavigateBack,
    /// Switch the view to `narrow`, scrolled to `anchor`.
    Narrow { narrow: Narrow, anchor: u64 },
    StartEditMessage { message_id: u64, topic: String },
    /// Drop an unsent message, keyed by its local timestamp.
    DeleteOutboxMessage { local_id: i64 },
    NavigateToEmojiPicker { message_id: u64 },
}

pub type IntentSender = UnboundedSender<Intent>;
