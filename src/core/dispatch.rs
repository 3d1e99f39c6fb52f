//! # Action Dispatcher
//!
//! Resolves a selection back to an action and starts its handler.
//!
//! Dispatch is fire-and-forget: the handler runs as its own tokio task and
//! its failures are logged there, never reported to the caller. The task
//! handle is returned for callers that want to wait anyway (a CLI about to
//! exit, or a test).

use log::{info, warn};
use tokio::task::JoinHandle;

use crate::MenuTarget;
use crate::core::action::{ActionId, HeaderAction, MessageAction};
use crate::core::handlers::{self, ActionParams};
use crate::core::localize::Localizer;
use crate::core::registry::ActionRegistry;

/// Finds the registry entry whose localized title equals `title`.
///
/// The first match in registry order wins. Unknown titles resolve to `None`.
pub fn resolve_title(
    registry: &ActionRegistry,
    target: &MenuTarget,
    title: &str,
    localizer: &dyn Localizer,
) -> Option<ActionId> {
    let is_title = |key: &str| localizer.get_string(key) == title;
    match target {
        MenuTarget::Message => registry
            .message_entries()
            .iter()
            .map(|entry| entry.action())
            .find(|action| is_title(action.title()))
            .map(ActionId::Message),
        MenuTarget::Header => registry
            .header_entries()
            .iter()
            .copied()
            .find(|action| is_title(action.title()))
            .map(ActionId::Header),
    }
}

/// Starts the handler for `action`. Cancel starts nothing.
///
/// Must be called from within a tokio runtime.
pub fn dispatch(action: ActionId, params: ActionParams) -> Option<JoinHandle<()>> {
    if action.is_cancel() {
        info!("Action sheet cancelled");
        return None;
    }

    info!("Dispatching {:?} for message {}", action, params.message.id);
    Some(tokio::spawn(async move {
        if let Err(e) = handlers::run(action, &params).await {
            warn!("{:?} failed for message {}: {}", action, params.message.id, e);
        }
    }))
}

/// Resolves a title reported by the sheet and dispatches it.
/// Titles that match nothing are ignored.
pub fn execute_by_title(
    registry: &ActionRegistry,
    target: &MenuTarget,
    title: &str,
    params: ActionParams,
) -> Option<JoinHandle<()>> {
    match resolve_title(registry, target, title, params.localizer.as_ref()) {
        Some(action) => dispatch(action, params),
        None => {
            info!("No {:?} action titled {:?}", target, title);
            None
        }
    }
}

/// The cancel action of a sheet.
pub fn cancel_action(target: &MenuTarget) -> ActionId {
    match target {
        MenuTarget::Message => ActionId::Message(MessageAction::Cancel),
        MenuTarget::Header => ActionId::Header(HeaderAction::Cancel),
    }
}
