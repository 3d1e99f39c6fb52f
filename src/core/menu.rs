//! # Menu Builder
//!
//! Turns the registry plus a session snapshot into the concrete, ordered,
//! localized sheet the widget shows. Synchronous and pure.
//!
//! Each entry keeps its symbolic [`ActionId`] next to the display title, so
//! the index the widget reports back resolves without any string matching.

use std::collections::HashSet;

use log::{debug, warn};

use crate::MenuTarget;
use crate::core::action::{ActionId, HeaderAction, MessageAction};
use crate::core::localize::Localizer;
use crate::core::message::{Auth, Flags, Message, MuteTuple, Subscription, find_subscription, is_topic_muted};
use crate::core::narrow::Narrow;
use crate::core::predicate::FilterContext;
use crate::core::registry::{ActionRegistry, DynamicSlot, MessageEntry};

/// Everything a sheet is built from.
#[derive(Debug, Clone, Copy)]
pub struct MenuContext<'a> {
    pub message: &'a Message,
    pub auth: &'a Auth,
    pub narrow: &'a Narrow,
    pub flags: &'a Flags,
    pub subscriptions: &'a [Subscription],
    pub mute: &'a [MuteTuple],
}

impl<'a> MenuContext<'a> {
    pub fn filter_context(&self) -> FilterContext<'a> {
        FilterContext {
            message: self.message,
            auth: self.auth,
            narrow: self.narrow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub action: ActionId,
    pub title: String,
}

/// A built sheet. Cancel is always present and always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    fn push(&mut self, action: ActionId, localizer: &dyn Localizer) {
        self.entries.push(MenuEntry {
            action,
            title: localizer.get_string(action.title()),
        });
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }

    pub fn actions(&self) -> Vec<ActionId> {
        self.entries.iter().map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cancel_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// The action behind the index a widget reported, if any.
    pub fn action_at(&self, index: usize) -> Option<ActionId> {
        self.entries.get(index).map(|e| e.action)
    }

    pub fn contains(&self, action: ActionId) -> bool {
        self.entries.iter().any(|e| e.action == action)
    }

    /// The first title shown more than once, if any. A repeated title makes
    /// title-based selection ambiguous.
    pub fn repeated_title(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.title.as_str())
            .find(|title| !seen.insert(*title))
    }

    fn warn_on_repeated_title(&self) {
        if let Some(title) = self.repeated_title() {
            warn!("Sheet shows {:?} more than once; selecting it by title picks the first", title);
        }
    }
}

/// Builds the per-message sheet.
pub fn build_message_menu(
    registry: &ActionRegistry,
    ctx: &MenuContext<'_>,
    localizer: &dyn Localizer,
) -> Menu {
    let filter = ctx.filter_context();
    let mut menu = Menu { entries: Vec::new() };

    for entry in registry.message_entries() {
        if entry.is_listed(&filter) {
            menu.push(ActionId::Message(entry.action()), localizer);
        }
    }

    if !ctx.message.is_outbox() {
        let starred = ctx.flags.is_starred(ctx.message.id);
        let wanted = if starred {
            MessageAction::UnstarMessage
        } else {
            MessageAction::StarMessage
        };
        if let Some(action) = dynamic_action(registry, DynamicSlot::Star, wanted) {
            menu.push(ActionId::Message(action), localizer);
        }
    }

    let cancel = dynamic_action(registry, DynamicSlot::Cancel, MessageAction::Cancel)
        .unwrap_or(MessageAction::Cancel);
    menu.push(ActionId::Message(cancel), localizer);

    debug!(
        "Built message sheet for message {}: {:?}",
        ctx.message.id,
        menu.actions()
    );
    menu.warn_on_repeated_title();
    menu
}

/// Finds `wanted` among the registry's dynamic entries for `slot`.
fn dynamic_action(registry: &ActionRegistry, slot: DynamicSlot, wanted: MessageAction) -> Option<MessageAction> {
    registry.message_entries().iter().find_map(|entry| match entry {
        MessageEntry::Dynamic { action, slot: s } if *s == slot && *action == wanted => Some(*action),
        _ => None,
    })
}

/// Builds the per-header sheet. Direct-message headers get only Cancel.
pub fn build_header_menu(
    registry: &ActionRegistry,
    ctx: &MenuContext<'_>,
    localizer: &dyn Localizer,
) -> Menu {
    let mut menu = Menu { entries: Vec::new() };
    let push = |menu: &mut Menu, action: HeaderAction| {
        if registry.header_entries().contains(&action) {
            menu.push(ActionId::Header(action), localizer);
        }
    };

    if let Some(stream) = ctx.message.stream_name() {
        if is_topic_muted(stream, &ctx.message.subject, ctx.mute) {
            push(&mut menu, HeaderAction::UnmuteTopic);
        } else {
            push(&mut menu, HeaderAction::MuteTopic);
        }

        let stream_muted = find_subscription(ctx.subscriptions, stream).is_some_and(|sub| !sub.in_home_view);
        if stream_muted {
            push(&mut menu, HeaderAction::UnmuteStream);
        } else {
            push(&mut menu, HeaderAction::MuteStream);
        }
    }

    menu.push(ActionId::Header(HeaderAction::Cancel), localizer);

    debug!(
        "Built header sheet for message {}: {:?}",
        ctx.message.id,
        menu.actions()
    );
    menu.warn_on_repeated_title();
    menu
}

pub fn build_menu(
    target: &MenuTarget,
    registry: &ActionRegistry,
    ctx: &MenuContext<'_>,
    localizer: &dyn Localizer,
) -> Menu {
    match target {
        MenuTarget::Message => build_message_menu(registry, ctx, localizer),
        MenuTarget::Header => build_header_menu(registry, ctx, localizer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::localize::English;
    use crate::core::message::DELETED_CONTENT;
    use crate::test_support::{
        Snapshot, other_message, outbox_message, own_message, private_message, SELF_EMAIL,
    };

    fn message_actions(snapshot: &Snapshot) -> Vec<MessageAction> {
        let registry = ActionRegistry::standard();
        build_message_menu(&registry, &snapshot.context(), &English)
            .actions()
            .into_iter()
            .map(|a| match a {
                ActionId::Message(m) => m,
                other => panic!("header action in message sheet: {other:?}"),
            })
            .collect()
    }

    fn header_titles(snapshot: &Snapshot) -> Vec<String> {
        let registry = ActionRegistry::standard();
        build_header_menu(&registry, &snapshot.context(), &English).titles()
    }

    #[test]
    fn test_other_users_message_in_topic() {
        let snapshot = Snapshot::new(other_message());
        assert_eq!(
            message_actions(&snapshot),
            vec![
                MessageAction::AddReaction,
                MessageAction::Reply,
                MessageAction::CopyToClipboard,
                MessageAction::Share,
                MessageAction::StarMessage,
                MessageAction::Cancel,
            ]
        );
    }

    #[test]
    fn test_own_message_in_topic_adds_edit_and_delete() {
        let snapshot = Snapshot::new(own_message());
        assert_eq!(
            message_actions(&snapshot),
            vec![
                MessageAction::AddReaction,
                MessageAction::Reply,
                MessageAction::CopyToClipboard,
                MessageAction::Share,
                MessageAction::EditMessage,
                MessageAction::DeleteMessage,
                MessageAction::StarMessage,
                MessageAction::Cancel,
            ]
        );
    }

    #[test]
    fn test_own_message_in_home_cannot_be_edited() {
        let mut snapshot = Snapshot::new(own_message());
        snapshot.narrow = Narrow::Home;
        let actions = message_actions(&snapshot);
        assert!(!actions.contains(&MessageAction::EditMessage));
        assert!(actions.contains(&MessageAction::DeleteMessage));
    }

    #[test]
    fn test_deleted_message() {
        for message in [own_message(), other_message()] {
            let mut snapshot = Snapshot::new(message);
            snapshot.message.content = DELETED_CONTENT.to_string();
            let actions = message_actions(&snapshot);
            for absent in [
                MessageAction::AddReaction,
                MessageAction::CopyToClipboard,
                MessageAction::Share,
                MessageAction::DeleteMessage,
            ] {
                assert!(!actions.contains(&absent), "{absent:?} in {actions:?}");
            }
            assert!(actions.contains(&MessageAction::Reply));
        }
    }

    #[test]
    fn test_outbox_message() {
        let mut snapshot = Snapshot::new(outbox_message("pending"));
        snapshot.flags.starred.insert(snapshot.message.id);
        assert_eq!(
            message_actions(&snapshot),
            vec![MessageAction::CopyToClipboard, MessageAction::Share, MessageAction::Cancel]
        );
    }

    #[test]
    fn test_star_or_unstar_never_both() {
        let mut snapshot = Snapshot::new(other_message());
        let actions = message_actions(&snapshot);
        assert!(actions.contains(&MessageAction::StarMessage));
        assert!(!actions.contains(&MessageAction::UnstarMessage));

        snapshot.flags.starred.insert(snapshot.message.id);
        let actions = message_actions(&snapshot);
        assert!(actions.contains(&MessageAction::UnstarMessage));
        assert!(!actions.contains(&MessageAction::StarMessage));
        assert_eq!(actions.last(), Some(&MessageAction::Cancel));
    }

    #[test]
    fn test_cancel_index_is_last() {
        let registry = ActionRegistry::standard();
        let snapshot = Snapshot::new(other_message());
        let menu = build_message_menu(&registry, &snapshot.context(), &English);
        assert_eq!(menu.cancel_index(), menu.len() - 1);
        assert_eq!(
            menu.action_at(menu.cancel_index()),
            Some(ActionId::Message(MessageAction::Cancel))
        );
        assert_eq!(menu.action_at(menu.len()), None);
    }

    #[test]
    fn test_titles_are_localized() {
        use crate::core::localize::TableLocalizer;
        use std::collections::HashMap;

        let localizer = TableLocalizer::new(HashMap::from([
            ("Reply".to_string(), "Antworten".to_string()),
            ("Cancel".to_string(), "Abbrechen".to_string()),
        ]));
        let registry = ActionRegistry::standard();
        let snapshot = Snapshot::new(other_message());
        let titles = build_message_menu(&registry, &snapshot.context(), &localizer).titles();
        assert_eq!(titles[1], "Antworten");
        assert_eq!(titles.last().map(String::as_str), Some("Abbrechen"));
    }

    #[test]
    fn test_distinct_titles_have_no_repeat() {
        let registry = ActionRegistry::standard();
        let snapshot = Snapshot::new(own_message());
        for target in [MenuTarget::Message, MenuTarget::Header] {
            let menu = build_menu(&target, &registry, &snapshot.context(), &English);
            assert_eq!(menu.repeated_title(), None);
        }
    }

    #[test]
    fn test_colliding_translations_are_detected() {
        use crate::core::localize::TableLocalizer;
        use std::collections::HashMap;

        let localizer = TableLocalizer::new(HashMap::from([
            ("Mute topic".to_string(), "Stumm".to_string()),
            ("Mute stream".to_string(), "Stumm".to_string()),
        ]));
        let registry = ActionRegistry::standard();
        let snapshot = Snapshot::new(other_message());
        let menu = build_header_menu(&registry, &snapshot.context(), &localizer);
        assert_eq!(menu.titles(), vec!["Stumm", "Stumm", "Cancel"]);
        assert_eq!(menu.repeated_title(), Some("Stumm"));
    }

    #[test]
    fn test_header_unmuted_topic_and_stream() {
        let snapshot = Snapshot::new(other_message());
        assert_eq!(header_titles(&snapshot), vec!["Mute topic", "Mute stream", "Cancel"]);
    }

    #[test]
    fn test_header_muted_topic_and_stream() {
        let mut snapshot = Snapshot::new(other_message());
        snapshot
            .mute
            .push(MuteTuple("general".into(), "lunch".into()));
        snapshot.subscriptions[0].in_home_view = false;
        assert_eq!(
            header_titles(&snapshot),
            vec!["Unmute topic", "Unmute stream", "Cancel"]
        );
    }

    #[test]
    fn test_header_without_subscription_offers_mute_stream() {
        let mut snapshot = Snapshot::new(other_message());
        snapshot.subscriptions.clear();
        assert_eq!(header_titles(&snapshot), vec!["Mute topic", "Mute stream", "Cancel"]);
    }

    #[test]
    fn test_header_for_private_message_is_cancel_only() {
        let snapshot = Snapshot::new(private_message(&[SELF_EMAIL, "hamlet@example.com"]));
        assert_eq!(header_titles(&snapshot), vec!["Cancel"]);
    }

    #[test]
    fn test_build_menu_by_target() {
        let registry = ActionRegistry::standard();
        let snapshot = Snapshot::new(other_message());
        let header = build_menu(&MenuTarget::Header, &registry, &snapshot.context(), &English);
        assert!(header.contains(ActionId::Header(HeaderAction::MuteTopic)));
        let message = build_menu(&MenuTarget::Message, &registry, &snapshot.context(), &English);
        assert!(message.contains(ActionId::Message(MessageAction::Reply)));
    }
}
