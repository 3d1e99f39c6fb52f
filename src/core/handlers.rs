//! # Action Handlers
//!
//! One async function per action. Each is a thin call into a collaborator:
//! an [`Intent`] for app state, a [`MessageApi`] call for the server, or a
//! [`Platform`] capability. Outbox messages never reach the server by id.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::api::{ApiError, MessageApi};
use crate::core::action::{ActionId, HeaderAction, Intent, IntentSender, MESSAGE_COPIED, MessageAction, Route};
use crate::core::localize::Localizer;
use crate::core::message::{Auth, Message, Subscription, find_subscription};
use crate::core::narrow::narrow_from_message;
use crate::platform::Platform;

/// Called after Reply to focus the compose box.
pub type ReplyCallback = Arc<dyn Fn() + Send + Sync>;

/// Everything a handler may touch. Owned, so a handler can outlive the
/// sheet that spawned it.
#[derive(Clone)]
pub struct ActionParams {
    pub auth: Auth,
    pub message: Message,
    pub subscriptions: Vec<Subscription>,
    pub dispatch: IntentSender,
    pub current_route: Route,
    pub on_reply_select: Option<ReplyCallback>,
    pub localizer: Arc<dyn Localizer>,
    pub api: Arc<dyn MessageApi>,
    pub platform: Arc<dyn Platform>,
}

impl ActionParams {
    fn emit(&self, intent: Intent) -> Result<(), ActionError> {
        debug!("Emitting intent {:?}", intent);
        self.dispatch.send(intent).map_err(|_| ActionError::SinkClosed)
    }

    /// Fails for outbox messages, whose id is only a local timestamp.
    fn server_id(&self) -> Result<u64, ActionError> {
        if self.message.is_outbox() {
            return Err(ActionError::OutboxMessage(self.message.id));
        }
        Ok(self.message.id)
    }

    /// Stream name of the message, or `None` for direct messages.
    fn stream(&self) -> Option<&str> {
        self.message.stream_name()
    }
}

#[derive(Debug)]
pub enum ActionError {
    Api(ApiError),
    /// A stream action was chosen but the user has no subscription to it.
    NoSubscription(String),
    /// A stream or topic action was chosen on a direct message.
    NotAStreamMessage(u64),
    /// A server-side action was chosen on a message the server has not
    /// assigned an id to yet.
    OutboxMessage(u64),
    /// Nobody is listening for intents anymore.
    SinkClosed,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Api(e) => write!(f, "{e}"),
            ActionError::NoSubscription(stream) => write!(f, "not subscribed to stream '{stream}'"),
            ActionError::NotAStreamMessage(id) => write!(f, "message {id} is not a stream message"),
            ActionError::OutboxMessage(id) => write!(f, "message {id} has not been sent yet"),
            ActionError::SinkClosed => write!(f, "intent receiver dropped"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<ApiError> for ActionError {
    fn from(e: ApiError) -> Self {
        ActionError::Api(e)
    }
}

/// Runs the handler for `action`.
pub async fn run(action: ActionId, params: &ActionParams) -> Result<(), ActionError> {
    match action {
        ActionId::Message(action) => match action {
            MessageAction::AddReaction => add_reaction(params),
            MessageAction::Reply => reply(params),
            MessageAction::CopyToClipboard => copy_to_clipboard(params).await,
            MessageAction::Share => share_message(params),
            MessageAction::EditMessage => edit_message(params),
            MessageAction::DeleteMessage => delete_message(params).await,
            MessageAction::StarMessage => set_starred(params, true).await,
            MessageAction::UnstarMessage => set_starred(params, false).await,
            MessageAction::Cancel => Ok(()),
        },
        ActionId::Header(action) => match action {
            HeaderAction::MuteTopic => set_topic_muted(params, true).await,
            HeaderAction::UnmuteTopic => set_topic_muted(params, false).await,
            HeaderAction::MuteStream => set_stream_muted(params, true).await,
            HeaderAction::UnmuteStream => set_stream_muted(params, false).await,
            HeaderAction::Cancel => Ok(()),
        },
    }
}

fn reply(params: &ActionParams) -> Result<(), ActionError> {
    if params.current_route == Route::Search {
        params.emit(Intent::NavigateBack)?;
    }
    params.emit(Intent::Narrow {
        narrow: narrow_from_message(&params.message, &params.auth.email),
        anchor: params.message.id,
    })?;
    if let Some(focus) = &params.on_reply_select {
        focus();
    }
    Ok(())
}

async fn copy_to_clipboard(params: &ActionParams) -> Result<(), ActionError> {
    let raw = match params.message.outbox_source() {
        Some(source) => source.to_string(),
        None => {
            params
                .api
                .get_message_content(&params.auth, params.message.id)
                .await?
        }
    };
    params.platform.set_clipboard(&raw);
    params
        .platform
        .show_toast(&params.localizer.get_string(MESSAGE_COPIED));
    Ok(())
}

fn edit_message(params: &ActionParams) -> Result<(), ActionError> {
    params.emit(Intent::StartEditMessage {
        message_id: params.server_id()?,
        topic: params.message.subject.clone(),
    })
}

async fn delete_message(params: &ActionParams) -> Result<(), ActionError> {
    if params.message.is_outbox() {
        return params.emit(Intent::DeleteOutboxMessage {
            local_id: params.message.timestamp,
        });
    }
    params
        .api
        .delete_message(&params.auth, params.message.id)
        .await?;
    Ok(())
}

async fn set_topic_muted(params: &ActionParams, muted: bool) -> Result<(), ActionError> {
    let stream = params
        .stream()
        .ok_or(ActionError::NotAStreamMessage(params.message.id))?;
    let topic = &params.message.subject;
    if muted {
        params.api.mute_topic(&params.auth, stream, topic).await?;
    } else {
        params.api.unmute_topic(&params.auth, stream, topic).await?;
    }
    Ok(())
}

/// The server call is skipped when there is no matching subscription.
async fn set_stream_muted(params: &ActionParams, muted: bool) -> Result<(), ActionError> {
    let stream = params
        .stream()
        .ok_or(ActionError::NotAStreamMessage(params.message.id))?;
    let Some(sub) = find_subscription(&params.subscriptions, stream) else {
        return Err(ActionError::NoSubscription(stream.to_string()));
    };
    params
        .api
        .toggle_mute_stream(&params.auth, sub.stream_id, muted)
        .await?;
    Ok(())
}

async fn set_starred(params: &ActionParams, starred: bool) -> Result<(), ActionError> {
    let id = params.server_id()?;
    params
        .api
        .toggle_message_starred(&params.auth, &[id], starred)
        .await?;
    Ok(())
}

fn share_message(params: &ActionParams) -> Result<(), ActionError> {
    params.platform.share(&strip_tags(&params.message.content));
    Ok(())
}

fn add_reaction(params: &ActionParams) -> Result<(), ActionError> {
    let message_id = params.server_id()?;
    info!("Opening emoji picker for message {}", message_id);
    params.emit(Intent::NavigateToEmojiPicker { message_id })
}

/// Removes every `<...>` tag, including ones spanning lines. An unclosed
/// `<` is kept as text.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}
