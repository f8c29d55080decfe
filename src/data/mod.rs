//! The in-memory sales dataset.
//!
//! Four flat tables joined by a single foreign key (`account_id`). The whole
//! dataset is constructed exactly once at startup by [`loader::load_dataset`]
//! and shared read-only for the remainder of the process lifetime; no update
//! or delete path exists.

use chrono::NaiveDate;

pub mod analytics;
pub mod loader;

/// A customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account identifier (join key for all child tables).
    pub account_id: String,
    /// Display name.
    pub account_name: String,
}

/// A sales opportunity, denormalized with its account's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    /// Opportunity identifier.
    pub opportunity_id: String,
    /// Owning account identifier.
    pub account_id: String,
    /// Monetary amount.
    pub amount: f64,
    /// Win probability as a percentage (0–100).
    pub probability: f64,
    /// Pipeline stage label. Categorical, unordered.
    pub stage: String,
    /// Expected close date.
    pub close_date: NaiveDate,
    /// Account display name. `None` when the account id has no match.
    pub account_name: Option<String>,
}

/// A contact person, denormalized with its account's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Contact identifier.
    pub contact_id: String,
    /// Owning account identifier.
    pub account_id: String,
    /// Display name.
    pub contact_name: String,
    /// Email address.
    pub email: String,
    /// Account display name. `None` when the account id has no match.
    pub account_name: Option<String>,
}

/// An activity record. Every column beyond the raw source is optional:
/// absent source columns leave the field unset rather than failing the load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    /// Owning account identifier, when the source has an `ACCOUNT_ID` column.
    pub account_id: Option<String>,
    /// Activity date, when the source has an `ACTIVITY_DATE` column.
    pub activity_date: Option<NaiveDate>,
    /// Account display name, when the account id is present and matches.
    pub account_name: Option<String>,
}

/// The four loaded tables. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Accounts table.
    pub accounts: Vec<Account>,
    /// Opportunities table, account names joined in.
    pub opportunities: Vec<Opportunity>,
    /// Contacts table, account names joined in.
    pub contacts: Vec<Contact>,
    /// Tasks table, account names joined in where possible.
    pub tasks: Vec<Task>,
}
