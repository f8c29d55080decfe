//! AI Assistant tab: free-text Q&A grounded in an opportunity slice.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Widget;

use super::{render_input_line, render_output_pane};

/// Assistant view state.
#[derive(Debug, Default)]
pub struct AssistantState {
    /// The user's question. Generation requires it to be non-empty.
    pub question: String,
    /// Raw gateway response, once requested.
    pub answer: Option<String>,
    /// Answer pane scroll offset.
    pub scroll: u16,
}

/// Assistant view widget.
pub struct AssistantView<'a> {
    state: &'a AssistantState,
    busy: bool,
    spinner: char,
    editing: bool,
}

impl<'a> AssistantView<'a> {
    /// Borrow the state for rendering.
    pub fn new(state: &'a AssistantState, busy: bool, spinner: char, editing: bool) -> Self {
        Self {
            state,
            busy,
            spinner,
            editing,
        }
    }
}

impl Widget for AssistantView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        render_input_line(
            chunks[0],
            buf,
            "ASK ABOUT SALES ACTIVITY",
            &self.state.question,
            "e.g., Which accounts have the highest pipeline?  (press e to type)",
            self.editing,
        );
        render_output_pane(
            chunks[1],
            buf,
            "ANSWER",
            self.state.answer.as_deref(),
            self.busy,
            self.spinner,
            "Type a question, then press g to ask",
            self.state.scroll,
        );
    }
}
