//! # Core Action Logic
//!
//! This module contains Parley's rules for the message action sheet.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!     ┌────────────┐   ┌────────────┐   ┌────────────┐
//!     │ predicate  │──▶│  registry  │──▶│    menu    │  titles
//!     │ (filters)  │   │ (ordered)  │   │ (builder)  │─────────┐
//!     └────────────┘   └─────┬──────┘   └────────────┘         ▼
//!                            │                          ┌────────────┐
//!                            │        selected title    │    TUI     │
//!                            ▼       ◀──────────────────│   sheet    │
//!                     ┌────────────┐                    └────────────┘
//!                     │  dispatch  │
//!                     └─────┬──────┘
//!                           ▼
//!                     ┌────────────┐      ┌─────────────────────────┐
//!                     │  handlers  │─────▶│ api / platform / intents│
//!                     └────────────┘      └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: Messages, credentials and the session lookups over them
//! - [`narrow`]: Conversation filters
//! - [`predicate`]: Eligibility filters and `all_of`
//! - [`action`]: Action identifiers, titles and navigation intents
//! - [`registry`]: The ordered action lists and their eligibility
//! - [`menu`]: Builds the localized option list for a sheet
//! - [`dispatch`]: Maps a chosen title back to its action and runs it
//! - [`handlers`]: What each action does
//! - [`localize`]: Translation lookup
//! - [`config`]: Settings file and overrides

pub mod action;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod localize;
pub mod menu;
pub mod message;
pub mod narrow;
pub mod predicate;
pub mod registry;
