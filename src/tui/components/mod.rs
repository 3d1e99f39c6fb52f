//! # TUI Components
//!
//! Components follow the persistent state + transient wrapper pattern: the
//! state struct survives between frames and handles events, the wrapper is
//! built each frame with borrowed state and only renders.

pub mod action_sheet;
pub use action_sheet::{ActionSheet, ActionSheetEvent, ActionSheetState};
