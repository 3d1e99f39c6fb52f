//! # Action Sheet Component
//!
//! Centered overlay listing the options of a long-press menu.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ActionSheetState` lives for as long as the sheet is open
//! - `ActionSheet` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the action sheet overlay.
pub struct ActionSheetState {
    pub options: Vec<String>,
    pub cancel_index: Option<usize>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ActionSheetState {
    pub fn new(options: Vec<String>, cancel_index: Option<usize>) -> Self {
        let mut list_state = ListState::default();
        if !options.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            options,
            cancel_index,
            selected: 0,
            list_state,
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }
}

/// Events emitted by the action sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSheetEvent {
    /// Index into the options
    Select(usize),
    Dismiss,
}

impl EventHandler for ActionSheetState {
    type Event = ActionSheetEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ActionSheetEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Quit => Some(ActionSheetEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.options.is_empty() {
                    self.select(self.selected.saturating_sub(1));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.options.is_empty() {
                    self.select((self.selected + 1).min(self.options.len() - 1));
                }
                None
            }
            TuiEvent::Pick(index) if *index < self.options.len() => {
                self.select(*index);
                Some(ActionSheetEvent::Select(*index))
            }
            TuiEvent::Submit if self.selected < self.options.len() => {
                Some(ActionSheetEvent::Select(self.selected))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the action sheet overlay.
pub struct ActionSheet<'a> {
    state: &'a mut ActionSheetState,
    title: &'a str,
}

impl<'a> ActionSheet<'a> {
    pub fn new(state: &'a mut ActionSheetState, title: &'a str) -> Self {
        Self { state, title }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Options + borders, but never more than the screen
        let wanted = u16::try_from(self.state.options.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let overlay = centered_rect(60, wanted.min(area.height), area);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ↑↓ Move  Enter Choose  Esc Dismiss ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if Some(i) == self.state.cancel_index {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let shortcut = if i < 9 {
                    format!("{} ", i + 1)
                } else {
                    "  ".to_string()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(shortcut, Style::default().fg(Color::DarkGray)),
                    Span::styled(option.as_str(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Centered rect: `percent_x` of the width, exactly `height` rows.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
