//! DealDesk — a terminal sales analytics dashboard with AI insights.
//!
//! Loads four CSV tables (accounts, opportunities, contacts, tasks) once at
//! startup, renders pipeline metrics and a stage chart in a TUI, and forwards
//! user questions plus slices of the data to the Groq chat-completions API.
//!
//! See `DESIGN.md` for full architecture documentation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod data;
pub mod gateway;
pub mod logging;
pub mod prompts;
pub mod tui;
