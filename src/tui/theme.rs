//! Color palette for the dashboard.

use ratatui::style::Color;

/// Palette constants shared by all views.
pub struct Theme;

impl Theme {
    /// Primary accent (titles, selected tab, bars).
    pub const ACCENT: Color = Color::Cyan;
    /// Default text.
    pub const TEXT: Color = Color::Gray;
    /// Secondary text (hints, labels).
    pub const SUBTEXT: Color = Color::DarkGray;
    /// Borders and separators.
    pub const BORDER: Color = Color::DarkGray;
    /// Positive highlight (metric values).
    pub const VALUE: Color = Color::Green;
    /// Busy/pending indicator.
    pub const BUSY: Color = Color::Yellow;
    /// Generated output text. Gateway error strings render here too.
    pub const OUTPUT: Color = Color::White;
    /// Focused selector border.
    pub const FOCUS: Color = Color::Cyan;
}
