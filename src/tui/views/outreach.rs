//! Outreach Generator tab: templated email drafting per contact/tone/purpose.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Widget;

use crate::data::analytics::{contact_account_names, contacts_for_account};
use crate::data::Dataset;
use crate::prompts::Tone;

use super::{render_input_line, render_output_pane, render_selector};

/// Placeholder offered when the chosen account has no contact rows. The
/// selector never presents an empty list.
pub const NO_CONTACTS: &str = "No Contacts";

/// Which selector currently receives j/k input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutreachFocus {
    /// Account selector.
    #[default]
    Account,
    /// Contact selector (cascades from the account).
    Contact,
    /// Tone selector.
    Tone,
}

/// Outreach view state.
#[derive(Debug, Default)]
pub struct OutreachState {
    /// Distinct sorted non-null account names from the contact table.
    pub accounts: Vec<String>,
    /// Index of the selected account.
    pub account_idx: usize,
    /// Contact names for the selected account, or the placeholder.
    pub contacts: Vec<String>,
    /// Index of the selected contact.
    pub contact_idx: usize,
    /// Index into [`Tone::ALL`].
    pub tone_idx: usize,
    /// Free-text purpose. Generation requires it to be non-empty.
    pub purpose: String,
    /// Generated email. Editable after generation.
    pub email: Option<String>,
    /// Focused selector.
    pub focus: OutreachFocus,
    /// Email pane scroll offset.
    pub scroll: u16,
}

impl OutreachState {
    /// Build the cascading selectors from the loaded dataset.
    pub fn new(dataset: &Dataset) -> Self {
        let mut state = Self {
            accounts: contact_account_names(&dataset.contacts),
            ..Self::default()
        };
        state.refresh_contacts(dataset);
        state
    }

    /// Recompute the contact list after an account change.
    pub fn refresh_contacts(&mut self, dataset: &Dataset) {
        self.contacts = match self.selected_account() {
            Some(account) => {
                let names: Vec<String> = contacts_for_account(&dataset.contacts, account)
                    .iter()
                    .map(|c| c.contact_name.clone())
                    .collect();
                if names.is_empty() {
                    vec![NO_CONTACTS.to_owned()]
                } else {
                    names
                }
            }
            None => vec![NO_CONTACTS.to_owned()],
        };
        self.contact_idx = 0;
    }

    /// The currently selected account name, if any accounts exist.
    pub fn selected_account(&self) -> Option<&str> {
        self.accounts.get(self.account_idx).map(String::as_str)
    }

    /// The currently selected contact name (possibly the placeholder).
    pub fn selected_contact(&self) -> &str {
        self.contacts
            .get(self.contact_idx)
            .map_or(NO_CONTACTS, String::as_str)
    }

    /// The currently selected tone.
    pub fn selected_tone(&self) -> Tone {
        Tone::ALL[self.tone_idx % Tone::ALL.len()]
    }

    /// Move the focused selector's choice up. Returns whether the account
    /// changed (the caller must refresh the contact cascade).
    pub fn select_prev(&mut self) -> bool {
        match self.focus {
            OutreachFocus::Account => {
                let before = self.account_idx;
                self.account_idx = self.account_idx.saturating_sub(1);
                before != self.account_idx
            }
            OutreachFocus::Contact => {
                self.contact_idx = self.contact_idx.saturating_sub(1);
                false
            }
            OutreachFocus::Tone => {
                self.tone_idx = self.tone_idx.saturating_sub(1);
                false
            }
        }
    }

    /// Move the focused selector's choice down. Returns whether the account
    /// changed.
    pub fn select_next(&mut self) -> bool {
        match self.focus {
            OutreachFocus::Account => {
                if self.account_idx.saturating_add(1) < self.accounts.len() {
                    self.account_idx = self.account_idx.saturating_add(1);
                    return true;
                }
                false
            }
            OutreachFocus::Contact => {
                if self.contact_idx.saturating_add(1) < self.contacts.len() {
                    self.contact_idx = self.contact_idx.saturating_add(1);
                }
                false
            }
            OutreachFocus::Tone => {
                if self.tone_idx.saturating_add(1) < Tone::ALL.len() {
                    self.tone_idx = self.tone_idx.saturating_add(1);
                }
                false
            }
        }
    }

    /// Cycle focus across the three selectors.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            OutreachFocus::Account => OutreachFocus::Contact,
            OutreachFocus::Contact => OutreachFocus::Tone,
            OutreachFocus::Tone => OutreachFocus::Account,
        };
    }

    /// Cycle focus backwards.
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            OutreachFocus::Account => OutreachFocus::Tone,
            OutreachFocus::Contact => OutreachFocus::Account,
            OutreachFocus::Tone => OutreachFocus::Contact,
        };
    }
}

/// Outreach view widget.
pub struct OutreachView<'a> {
    state: &'a OutreachState,
    busy: bool,
    spinner: char,
    editing_purpose: bool,
    editing_email: bool,
}

impl<'a> OutreachView<'a> {
    /// Borrow the state for rendering.
    pub fn new(
        state: &'a OutreachState,
        busy: bool,
        spinner: char,
        editing_purpose: bool,
        editing_email: bool,
    ) -> Self {
        Self {
            state,
            busy,
            spinner,
            editing_purpose,
            editing_email,
        }
    }
}

impl Widget for OutreachView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(20)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Accounts
                Constraint::Min(5),    // Contacts
                Constraint::Length(5), // Tone
                Constraint::Length(3), // Purpose
            ])
            .split(columns[0]);

        let state = self.state;
        render_selector(
            left[0],
            buf,
            "ACCOUNT",
            &state.accounts,
            state.account_idx,
            state.focus == OutreachFocus::Account,
        );
        render_selector(
            left[1],
            buf,
            "CONTACT",
            &state.contacts,
            state.contact_idx,
            state.focus == OutreachFocus::Contact,
        );
        let tones: Vec<String> = Tone::ALL.iter().map(|t| t.label().to_owned()).collect();
        render_selector(
            left[2],
            buf,
            "TONE",
            &tones,
            state.tone_idx,
            state.focus == OutreachFocus::Tone,
        );
        render_input_line(
            left[3],
            buf,
            "EMAIL PURPOSE",
            &state.purpose,
            "e.g., Schedule discovery call  (press e to type)",
            self.editing_purpose,
        );

        // The generated email is shown in an editable pane: once present,
        // `e` puts the cursor here instead of the purpose field.
        let email_shown = match (&state.email, self.editing_email) {
            (Some(email), true) => Some(format!("{email}_")),
            (Some(email), false) => Some(email.clone()),
            (None, _) => None,
        };
        render_output_pane(
            columns[1],
            buf,
            "GENERATED EMAIL",
            email_shown.as_deref(),
            self.busy,
            self.spinner,
            "Pick account, contact, and tone; enter a purpose; press g",
            state.scroll,
        );
    }
}
