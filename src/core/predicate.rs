//! # Eligibility Predicates
//!
//! Atomic yes/no tests over a message, the current user and the narrow.
//! Every registry entry that is filtered in or out of the message menu
//! combines some of these with [`all_of`].
//!
//! Predicates are plain `fn` pointers: no captures, no side effects, and
//! nothing they read is optional, so they cannot fail.

use crate::core::message::{Auth, Message};
use crate::core::narrow::Narrow;

/// What a predicate gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub message: &'a Message,
    pub auth: &'a Auth,
    pub narrow: &'a Narrow,
}

pub type Predicate = fn(&FilterContext<'_>) -> bool;

pub fn is_sent_message(ctx: &FilterContext<'_>) -> bool {
    !ctx.message.is_outbox()
}

pub fn is_not_deleted(ctx: &FilterContext<'_>) -> bool {
    !ctx.message.is_deleted()
}

pub fn is_sent_by_self(ctx: &FilterContext<'_>) -> bool {
    ctx.auth.email == ctx.message.sender_email
}

/// Own message, viewed inside a specific conversation.
pub fn is_sent_by_self_and_narrowed(ctx: &FilterContext<'_>) -> bool {
    is_sent_by_self(ctx) && !ctx.narrow.is_home() && !ctx.narrow.is_special()
}

/// Never passes. Entries whose presence is decided outside the standard
/// filter report this.
pub fn skip(_ctx: &FilterContext<'_>) -> bool {
    false
}

/// True iff every predicate holds. An empty slice always holds.
pub fn all_of<'p>(predicates: &'p [Predicate]) -> impl Fn(&FilterContext<'_>) -> bool + 'p {
    move |ctx| predicates.iter().all(|p| p(ctx))
}

/// The eligibility test attached to a filtered registry entry.
#[derive(Debug, Clone, Copy)]
pub enum Eligibility {
    /// No test: always listed.
    Always,
    When(&'static [Predicate]),
}

impl Eligibility {
    pub fn allows(&self, ctx: &FilterContext<'_>) -> bool {
        match self {
            Eligibility::Always => true,
            Eligibility::When(predicates) => all_of(predicates)(ctx),
        }
    }
}
