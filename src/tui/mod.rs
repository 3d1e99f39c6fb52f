//! # TUI Adapter
//!
//! The ratatui-specific layer. Shows a menu's titles as an action sheet and
//! reports which one was chosen.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! hands it plain strings and a cancel index and gets an index back, so any
//! other widget honoring that contract can replace it.

mod component;
mod components;
mod event;

use log::{debug, info};
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::tui::component::EventHandler;
use crate::tui::components::{ActionSheet, ActionSheetEvent, ActionSheetState};
use crate::tui::event::{TuiEvent, poll_event_timeout};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Shows `options` in an action sheet and blocks until the user chooses.
///
/// Returns the chosen index, or `None` when the sheet was dismissed.
pub fn show_action_sheet(
    title: &str,
    options: Vec<String>,
    cancel_index: Option<usize>,
) -> io::Result<Option<usize>> {
    info!("Showing action sheet {:?} with {} options", title, options.len());
    let mut state = ActionSheetState::new(options, cancel_index);

    let mut terminal = ratatui::init();
    let result = (|| -> io::Result<Option<usize>> {
        let _terminal_mode_guard = TerminalModeGuard::new()?;
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| ActionSheet::new(&mut state, title).render(f, f.area()))?;
                needs_redraw = false;
            }

            let Some(event) = poll_event_timeout(Duration::from_millis(500))? else {
                continue;
            };
            needs_redraw = true;
            if event == TuiEvent::Resize {
                continue;
            }
            match state.handle_event(&event) {
                Some(ActionSheetEvent::Select(index)) => {
                    debug!("Action sheet selection: {}", index);
                    return Ok(Some(index));
                }
                Some(ActionSheetEvent::Dismiss) => {
                    debug!("Action sheet dismissed");
                    return Ok(None);
                }
                None => {}
            }
        }
    })();
    ratatui::restore();
    result
}
