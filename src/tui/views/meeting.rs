//! Meeting Prep tab: per-account brief from opportunity and contact subsets.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Widget;

use crate::data::analytics::opportunity_account_names;
use crate::data::Dataset;

use super::{render_output_pane, render_selector};

/// Meeting Prep view state.
#[derive(Debug, Default)]
pub struct MeetingState {
    /// Distinct sorted non-null account names from the opportunity table.
    pub accounts: Vec<String>,
    /// Index of the selected account.
    pub selected: usize,
    /// Generated brief, once requested.
    pub brief: Option<String>,
    /// Brief pane scroll offset.
    pub scroll: u16,
}

impl MeetingState {
    /// Build the account selector from the loaded dataset.
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            accounts: opportunity_account_names(&dataset.opportunities),
            ..Self::default()
        }
    }

    /// The currently selected account name, if any accounts exist.
    pub fn selected_account(&self) -> Option<&str> {
        self.accounts.get(self.selected).map(String::as_str)
    }

    /// Move the selection up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the selection down.
    pub fn select_next(&mut self) {
        if self.selected.saturating_add(1) < self.accounts.len() {
            self.selected = self.selected.saturating_add(1);
        }
    }
}

/// Meeting Prep view widget.
pub struct MeetingView<'a> {
    state: &'a MeetingState,
    busy: bool,
    spinner: char,
}

impl<'a> MeetingView<'a> {
    /// Borrow the state for rendering.
    pub fn new(state: &'a MeetingState, busy: bool, spinner: char) -> Self {
        Self {
            state,
            busy,
            spinner,
        }
    }
}

impl Widget for MeetingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(20)])
            .split(area);

        render_selector(
            chunks[0],
            buf,
            "SELECT ACCOUNT",
            &self.state.accounts,
            self.state.selected,
            true,
        );
        render_output_pane(
            chunks[1],
            buf,
            "MEETING BRIEF",
            self.state.brief.as_deref(),
            self.busy,
            self.spinner,
            "Pick an account with j/k, then press g to generate the brief",
            self.state.scroll,
        );
    }
}
