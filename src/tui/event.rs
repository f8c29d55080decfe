//! Key-to-action mapping.

use crossterm::event::{KeyCode, KeyEvent};

/// A UI action derived from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Switch to the tab at this index.
    SwitchTab(usize),
    /// Cycle to the next tab.
    NextTab,
    /// Move selection up.
    Up,
    /// Move selection down.
    Down,
    /// Move focus left (previous selector).
    Left,
    /// Move focus right (next selector).
    Right,
    /// Scroll the output pane up.
    ScrollUp,
    /// Scroll the output pane down.
    ScrollDown,
    /// Begin editing the current view's text field.
    StartEdit,
    /// Begin editing the generated output (outreach email).
    EditOutput,
    /// Trigger the current view's generate action.
    Generate,
    /// Leave editing mode / dismiss.
    Back,
    /// Submit the edited field.
    Submit,
    /// Append a character to the edited field.
    Input(char),
    /// Remove the last character of the edited field.
    DeleteChar,
    /// No-op.
    None,
}

/// Map a key event to an action.
///
/// `editing` selects between the normal-mode keymap and the text-entry
/// keymap: while editing, printable characters feed the field instead of
/// triggering commands.
pub fn key_to_action(key: KeyEvent, editing: bool) -> Action {
    if editing {
        return match key.code {
            KeyCode::Esc => Action::Back,
            KeyCode::Enter => Action::Submit,
            KeyCode::Backspace => Action::DeleteChar,
            KeyCode::Char(c) => Action::Input(c),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(c @ '1'..='4') => {
            let index = usize::from(u8::try_from(c).unwrap_or(b'1') - b'1');
            Action::SwitchTab(index)
        }
        KeyCode::Tab => Action::NextTab,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Char('h') | KeyCode::Left => Action::Left,
        KeyCode::Char('l') | KeyCode::Right => Action::Right,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        KeyCode::Char('e') | KeyCode::Char('/') => Action::StartEdit,
        KeyCode::Char('i') => Action::EditOutput,
        KeyCode::Char('g') | KeyCode::Enter => Action::Generate,
        KeyCode::Esc => Action::Back,
        _ => Action::None,
    }
}
