//! Interactive terminal dashboard (ratatui + crossterm).
//!
//! Four tabs: Dashboard, AI Assistant, Meeting Prep, Outreach Generator.
//! The dataset and gateway are constructed by the binary before the TUI
//! starts and passed in as shared read-only handles.

mod app;
mod event;
mod theme;
mod views;

pub use app::run;
