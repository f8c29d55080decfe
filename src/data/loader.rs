//! CSV loading, column normalization, and the account-name left join.
//!
//! Raw sources use upper-case column names (`ID`, `ACCOUNT_ID`, `AMOUNT`,
//! `STAGE_NAME`, …); the loader renames them to the canonical lower-case
//! schema, parses date columns, and left-joins each child table to the
//! account display name. Every loading failure is fatal: there is no
//! partial load.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::info;

use crate::config::DataConfig;

use super::{Account, Contact, Dataset, Opportunity, Task};

/// Optional task source columns, matched against the header row.
const TASK_ACCOUNT_COLUMN: &str = "ACCOUNT_ID";
const TASK_DATE_COLUMN: &str = "ACTIVITY_DATE";

// ---------------------------------------------------------------------------
// Raw wire rows (upper-case source schema)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawAccount {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "NAME")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawOpportunity {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "ACCOUNT_ID")]
    account_id: String,
    #[serde(rename = "AMOUNT")]
    amount: f64,
    #[serde(rename = "PROBABILITY")]
    probability: f64,
    #[serde(rename = "STAGE_NAME")]
    stage_name: String,
    #[serde(rename = "CLOSE_DATE")]
    close_date: String,
}

#[derive(Debug, Deserialize)]
struct RawContact {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "ACCOUNT_ID")]
    account_id: String,
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "EMAIL")]
    email: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load and normalize all four tables from the configured data directory.
///
/// Runs exactly once per process; the result is held immutable afterwards.
///
/// # Errors
///
/// Returns an error when any file is missing or malformed, or when a date
/// column fails to parse. Loading is all-or-nothing.
pub fn load_dataset(config: &DataConfig) -> anyhow::Result<Dataset> {
    let accounts = read_accounts(&config.accounts_path())?;

    // account_id -> account_name lookup for the left joins.
    let names: HashMap<&str, &str> = accounts
        .iter()
        .map(|a| (a.account_id.as_str(), a.account_name.as_str()))
        .collect();

    let opportunities = read_opportunities(&config.opportunities_path(), &names)?;
    let contacts = read_contacts(&config.contacts_path(), &names)?;
    let tasks = read_tasks(&config.tasks_path(), &names)?;

    info!(
        accounts = accounts.len(),
        opportunities = opportunities.len(),
        contacts = contacts.len(),
        tasks = tasks.len(),
        "dataset loaded"
    );

    Ok(Dataset {
        accounts,
        opportunities,
        contacts,
        tasks,
    })
}

fn read_accounts(path: &Path) -> anyhow::Result<Vec<Account>> {
    let mut reader = open_reader(path)?;
    let mut accounts = Vec::new();
    for row in reader.deserialize() {
        let raw: RawAccount =
            row.with_context(|| format!("malformed account row in {}", path.display()))?;
        accounts.push(Account {
            account_id: raw.id,
            account_name: raw.name,
        });
    }
    Ok(accounts)
}

fn read_opportunities(
    path: &Path,
    names: &HashMap<&str, &str>,
) -> anyhow::Result<Vec<Opportunity>> {
    let mut reader = open_reader(path)?;
    let mut opportunities = Vec::new();
    for row in reader.deserialize() {
        let raw: RawOpportunity =
            row.with_context(|| format!("malformed opportunity row in {}", path.display()))?;
        let close_date = parse_date(&raw.close_date).with_context(|| {
            format!(
                "unparseable close date for opportunity {} in {}",
                raw.id,
                path.display()
            )
        })?;
        // Left join: an unmatched account leaves the name absent, the row stays.
        let account_name = names.get(raw.account_id.as_str()).map(|&n| n.to_owned());
        opportunities.push(Opportunity {
            opportunity_id: raw.id,
            account_id: raw.account_id,
            amount: raw.amount,
            probability: raw.probability,
            stage: raw.stage_name,
            close_date,
            account_name,
        });
    }
    Ok(opportunities)
}

fn read_contacts(path: &Path, names: &HashMap<&str, &str>) -> anyhow::Result<Vec<Contact>> {
    let mut reader = open_reader(path)?;
    let mut contacts = Vec::new();
    for row in reader.deserialize() {
        let raw: RawContact =
            row.with_context(|| format!("malformed contact row in {}", path.display()))?;
        let account_name = names.get(raw.account_id.as_str()).map(|&n| n.to_owned());
        contacts.push(Contact {
            contact_id: raw.id,
            account_id: raw.account_id,
            contact_name: raw.name,
            email: raw.email,
            account_name,
        });
    }
    Ok(contacts)
}

/// Tasks have no fixed schema. The `ACCOUNT_ID` and `ACTIVITY_DATE` columns
/// are located from the header row; an absent column leaves the derived
/// field unset on every row rather than failing the load.
fn read_tasks(path: &Path, names: &HashMap<&str, &str>) -> anyhow::Result<Vec<Task>> {
    let mut reader = open_reader(path)?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?
        .clone();
    let account_idx = headers.iter().position(|h| h == TASK_ACCOUNT_COLUMN);
    let date_idx = headers.iter().position(|h| h == TASK_DATE_COLUMN);

    let mut tasks = Vec::new();
    for row in reader.records() {
        let record = row.with_context(|| format!("malformed task row in {}", path.display()))?;

        let account_id = account_idx
            .and_then(|i| record.get(i))
            .filter(|v| !v.trim().is_empty())
            .map(str::to_owned);

        let activity_date = match date_idx.and_then(|i| record.get(i)) {
            Some(value) if !value.trim().is_empty() => Some(parse_date(value).with_context(
                || format!("unparseable activity date in {}", path.display()),
            )?),
            _ => None,
        };

        let account_name = account_id
            .as_deref()
            .and_then(|id| names.get(id))
            .map(|&n| n.to_owned());

        tasks.push(Task {
            account_id,
            activity_date,
            account_name,
        });
    }
    Ok(tasks)
}

fn open_reader(path: &Path) -> anyhow::Result<csv::Reader<std::fs::File>> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

/// Parse a date column value.
///
/// Accepts ISO (`2026-03-31`) and US (`03/31/2026`) forms.
///
/// # Errors
///
/// Returns an error when neither format matches. Loader callers treat this
/// as fatal for the whole load.
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .map_err(|_| anyhow::anyhow!("unrecognized date: {trimmed:?}"))
}
