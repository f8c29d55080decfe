//! Prompt construction for the four views.
//!
//! The "API" between DealDesk and the model is unstructured text: each view
//! serializes a slice of the dataset as a fixed-width table and embeds it in
//! a fixed template. No schema is imposed on the model's output; the raw
//! response is displayed as-is.

use crate::data::analytics::StageSummary;
use crate::data::{Contact, Opportunity};

/// Number of opportunity rows embedded as assistant context.
///
/// Selection is positional — the first rows in current table order, not
/// ranked by any business criterion. A documented limitation.
pub const ASSISTANT_CONTEXT_ROWS: usize = 20;

/// Placeholder rendered for an absent joined account name.
const MISSING_NAME: &str = "-";

/// Email tone options offered by the outreach view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Straight business register.
    Professional,
    /// Warm and informal.
    Friendly,
    /// Short, senior-audience register.
    Executive,
}

impl Tone {
    /// All selectable tones, in display order.
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Friendly, Tone::Executive];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Executive => "Executive",
        }
    }

    fn lowercase(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Executive => "executive",
        }
    }
}

/// Prompt for the dashboard's on-demand insight: the serialized stage
/// aggregation plus a request for exactly 3 actionable insights.
pub fn pipeline_insights(stages: &[StageSummary]) -> String {
    let rows: Vec<Vec<String>> = stages
        .iter()
        .map(|s| vec![s.stage.clone(), format_number(s.amount)])
        .collect();
    let table = format_table(&["stage", "amount"], &rows);

    format!(
        "Analyze this sales pipeline data and provide 3 actionable insights:\n\
         {table}\n\
         Focus on opportunities, risks, and next actions."
    )
}

/// Prompt for the free-form assistant: the first
/// [`ASSISTANT_CONTEXT_ROWS`] opportunities (account, stage, amount,
/// probability) followed by the user's question verbatim.
pub fn assistant_answer(opportunities: &[Opportunity], question: &str) -> String {
    let rows: Vec<Vec<String>> = opportunities
        .iter()
        .take(ASSISTANT_CONTEXT_ROWS)
        .map(|o| {
            vec![
                o.account_name.clone().unwrap_or_else(|| MISSING_NAME.to_owned()),
                o.stage.clone(),
                format_number(o.amount),
                format_number(o.probability),
            ]
        })
        .collect();
    let table = format_table(&["account_name", "stage", "amount", "probability"], &rows);

    format!(
        "Sales Data (top 20 opportunities):\n\
         {table}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer concisely with specific numbers and recommendations."
    )
}

/// Prompt for a per-account meeting brief: opportunity and contact subsets
/// plus a request for a status summary, talking points, and next actions.
///
/// An account with zero matching contacts renders the literal `No contacts`
/// marker, never an empty table.
pub fn meeting_brief(account: &str, opportunities: &[&Opportunity], contacts: &[&Contact]) -> String {
    let opp_rows: Vec<Vec<String>> = opportunities
        .iter()
        .map(|o| {
            vec![
                o.stage.clone(),
                format_number(o.amount),
                format_number(o.probability),
                o.close_date.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    let opp_table = format_table(&["stage", "amount", "probability", "close_date"], &opp_rows);

    let contact_table = if contacts.is_empty() {
        "No contacts".to_owned()
    } else {
        let rows: Vec<Vec<String>> = contacts
            .iter()
            .map(|c| vec![c.contact_name.clone(), c.email.clone()])
            .collect();
        format_table(&["contact_name", "email"], &rows)
    };

    format!(
        "MEETING BRIEF for {account}\n\
         \n\
         Opportunities:\n\
         {opp_table}\n\
         \n\
         Contacts:\n\
         {contact_table}\n\
         \n\
         Provide:\n\
         1. Account status summary\n\
         2. Key talking points\n\
         3. Next action recommendations"
    )
}

/// Prompt for a templated outreach email with a prescribed structure.
pub fn outreach_email(tone: Tone, contact: &str, account: &str, purpose: &str) -> String {
    format!(
        "Write a {tone} sales email to {contact} at {account}.\n\
         Purpose: {purpose}\n\
         Structure: Subject line + Greeting + Body + Call-to-action + Sign-off\n\
         Keep under 150 words. Conversational tone.\n\
         From: Your Name, Sales Manager at Your Company",
        tone = tone.lowercase(),
    )
}

/// Render records as a fixed-width plain-text table: header row, one line
/// per record, columns left-aligned and padded to the widest cell.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len().saturating_add(1));
    lines.push(format_row(headers.iter().copied(), &widths));
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_owned()
}

/// Format a numeric cell: whole numbers without a fraction, otherwise two
/// decimal places.
fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
