//! # Action Registry
//!
//! The ordered entries both sheets are built from. Built once with
//! [`ActionRegistry::standard`] and handed to the menu builder and the
//! dispatcher by reference, so both always agree on order and titles.
//!
//! ```text
//! message entries                          header entries
//! ├── Filtered  AddReaction  sent ∧ ¬del   ├── UnmuteTopic ┐ one of, by
//! ├── Filtered  Reply        sent          ├── MuteTopic   ┘ mute list
//! ├── Filtered  Copy         ¬del          ├── MuteStream   ┐ one of, by
//! ├── Filtered  Share        ¬del          ├── UnmuteStream ┘ subscription
//! ├── Filtered  Edit         sent ∧ own+narrowed
//! ├── Filtered  Delete       sent ∧ own ∧ ¬del
//! ├── Dynamic   Star         ┐ one of, by starred flag
//! ├── Dynamic   Unstar       ┘
//! └── Dynamic   Cancel                     └── Cancel
//! ```

use crate::core::action::{HeaderAction, MessageAction};
use crate::core::predicate::{
    Eligibility, FilterContext, Predicate, is_not_deleted, is_sent_by_self,
    is_sent_by_self_and_narrowed, is_sent_message, skip,
};

const ADD_REACTION_IF: &[Predicate] = &[is_sent_message, is_not_deleted];
const REPLY_IF: &[Predicate] = &[is_sent_message];
const COPY_IF: &[Predicate] = &[is_not_deleted];
const SHARE_IF: &[Predicate] = &[is_not_deleted];
const EDIT_IF: &[Predicate] = &[is_sent_message, is_sent_by_self_and_narrowed];
const DELETE_IF: &[Predicate] = &[is_sent_message, is_sent_by_self, is_not_deleted];

/// Which state-dependent slot a dynamic entry fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicSlot {
    /// Star or Unstar, depending on the starred flag.
    Star,
    /// Always last.
    Cancel,
}

#[derive(Debug, Clone, Copy)]
pub enum MessageEntry {
    /// Listed iff its eligibility test passes.
    Filtered {
        action: MessageAction,
        only_if: Eligibility,
    },
    /// Never passes the standard filter; the menu builder adds it itself.
    Dynamic {
        action: MessageAction,
        slot: DynamicSlot,
    },
}

impl MessageEntry {
    pub fn action(&self) -> MessageAction {
        match self {
            MessageEntry::Filtered { action, .. } | MessageEntry::Dynamic { action, .. } => *action,
        }
    }

    /// The standard filter's verdict.
    pub fn is_listed(&self, ctx: &FilterContext<'_>) -> bool {
        match self {
            MessageEntry::Filtered { only_if, .. } => only_if.allows(ctx),
            MessageEntry::Dynamic { .. } => skip(ctx),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionRegistry {
    message: Vec<MessageEntry>,
    header: Vec<HeaderAction>,
}

impl ActionRegistry {
    pub fn new(message: Vec<MessageEntry>, header: Vec<HeaderAction>) -> Self {
        Self { message, header }
    }

    /// The stock message and header sheets.
    pub fn standard() -> Self {
        let filtered = |action: MessageAction, predicates: &'static [Predicate]| MessageEntry::Filtered {
            action,
            only_if: Eligibility::When(predicates),
        };
        let dynamic = |action: MessageAction, slot: DynamicSlot| MessageEntry::Dynamic { action, slot };

        Self::new(
            vec![
                filtered(MessageAction::AddReaction, ADD_REACTION_IF),
                filtered(MessageAction::Reply, REPLY_IF),
                filtered(MessageAction::CopyToClipboard, COPY_IF),
                filtered(MessageAction::Share, SHARE_IF),
                filtered(MessageAction::EditMessage, EDIT_IF),
                filtered(MessageAction::DeleteMessage, DELETE_IF),
                dynamic(MessageAction::StarMessage, DynamicSlot::Star),
                dynamic(MessageAction::UnstarMessage, DynamicSlot::Star),
                dynamic(MessageAction::Cancel, DynamicSlot::Cancel),
            ],
            vec![
                HeaderAction::UnmuteTopic,
                HeaderAction::MuteTopic,
                HeaderAction::MuteStream,
                HeaderAction::UnmuteStream,
                HeaderAction::Cancel,
            ],
        )
    }

    pub fn message_entries(&self) -> &[MessageEntry] {
        &self.message
    }

    pub fn header_entries(&self) -> &[HeaderAction] {
        &self.header
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{own_message, self_auth, topic_narrow};

    #[test]
    fn test_standard_order() {
        let registry = ActionRegistry::standard();
        let actions: Vec<_> = registry.message_entries().iter().map(|e| e.action()).collect();
        assert_eq!(
            actions,
            vec![
                MessageAction::AddReaction,
                MessageAction::Reply,
                MessageAction::CopyToClipboard,
                MessageAction::Share,
                MessageAction::EditMessage,
                MessageAction::DeleteMessage,
                MessageAction::StarMessage,
                MessageAction::UnstarMessage,
                MessageAction::Cancel,
            ]
        );
        assert_eq!(registry.header_entries().len(), 5);
    }

    #[test]
    fn test_dynamic_entries_never_pass_the_filter() {
        let registry = ActionRegistry::standard();
        let message = own_message();
        let auth = self_auth();
        let narrow = topic_narrow();
        let ctx = FilterContext {
            message: &message,
            auth: &auth,
            narrow: &narrow,
        };
        for entry in registry.message_entries() {
            if let MessageEntry::Dynamic { .. } = entry {
                assert!(!entry.is_listed(&ctx));
            } else {
                // Own, sent, live message in a topic: every filtered entry applies.
                assert!(entry.is_listed(&ctx), "{:?}", entry.action());
            }
        }
    }
}
