//! Derived aggregates over the loaded dataset.
//!
//! All arithmetic is exact `f64`; rounding happens only in display
//! formatting.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::{Contact, Opportunity};

/// Headline pipeline metrics for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineMetrics {
    /// Sum of all opportunity amounts.
    pub total_pipeline: f64,
    /// Sum of all probability-weighted amounts.
    pub weighted_pipeline: f64,
    /// Number of opportunities.
    pub active_deals: usize,
}

/// Total amount for one stage label.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSummary {
    /// Stage label.
    pub stage: String,
    /// Summed amount across the stage's opportunities.
    pub amount: f64,
}

/// Probability-weighted value of one opportunity:
/// `amount × (probability / 100)`.
pub fn weighted_amount(opp: &Opportunity) -> f64 {
    opp.amount * (opp.probability / 100.0)
}

/// Compute the headline metrics across all opportunities.
pub fn pipeline_metrics(opportunities: &[Opportunity]) -> PipelineMetrics {
    PipelineMetrics {
        total_pipeline: opportunities.iter().map(|o| o.amount).sum(),
        weighted_pipeline: opportunities.iter().map(weighted_amount).sum(),
        active_deals: opportunities.len(),
    }
}

/// Total amount grouped by stage label, in sorted label order.
///
/// The grouping partitions the opportunity set, so the per-stage amounts
/// always sum to the total pipeline. Ordering is presentational only.
pub fn stage_summary(opportunities: &[Opportunity]) -> Vec<StageSummary> {
    let mut by_stage: BTreeMap<&str, f64> = BTreeMap::new();
    for opp in opportunities {
        *by_stage.entry(opp.stage.as_str()).or_insert(0.0) += opp.amount;
    }
    by_stage
        .into_iter()
        .map(|(stage, amount)| StageSummary {
            stage: stage.to_owned(),
            amount,
        })
        .collect()
}

/// Distinct, sorted, non-null account names present in the opportunity table.
pub fn opportunity_account_names(opportunities: &[Opportunity]) -> Vec<String> {
    distinct_names(opportunities.iter().map(|o| o.account_name.as_deref()))
}

/// Distinct, sorted, non-null account names present in the contact table.
///
/// Deliberately independent from [`opportunity_account_names`]: the outreach
/// view offers accounts that have contacts, not accounts that have deals.
pub fn contact_account_names(contacts: &[Contact]) -> Vec<String> {
    distinct_names(contacts.iter().map(|c| c.account_name.as_deref()))
}

/// Opportunities whose joined account name exactly matches `account`.
pub fn opportunities_for_account<'a>(
    opportunities: &'a [Opportunity],
    account: &str,
) -> Vec<&'a Opportunity> {
    opportunities
        .iter()
        .filter(|o| o.account_name.as_deref() == Some(account))
        .collect()
}

/// Contacts whose joined account name exactly matches `account`.
pub fn contacts_for_account<'a>(contacts: &'a [Contact], account: &str) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|c| c.account_name.as_deref() == Some(account))
        .collect()
}

fn distinct_names<'a>(names: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let set: BTreeSet<&str> = names.flatten().collect();
    set.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn opp(id: &str, account: Option<&str>, stage: &str, amount: f64, probability: f64) -> Opportunity {
        Opportunity {
            opportunity_id: id.to_owned(),
            account_id: format!("acc-{id}"),
            amount,
            probability,
            stage: stage.to_owned(),
            close_date: NaiveDate::from_ymd_opt(2026, 9, 30).expect("valid date"),
            account_name: account.map(str::to_owned),
        }
    }

    #[test]
    fn weighted_amount_scales_by_probability() {
        let o = opp("1", Some("Acme"), "Proposal", 4000.0, 25.0);
        assert!((weighted_amount(&o) - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stage_amounts_partition_total_pipeline() {
        let opps = vec![
            opp("1", Some("Acme"), "Discovery", 1000.0, 50.0),
            opp("2", Some("Acme"), "Proposal", 2000.0, 50.0),
            opp("3", Some("Globex"), "Discovery", 3000.0, 50.0),
        ];
        let metrics = pipeline_metrics(&opps);
        let stages = stage_summary(&opps);
        let stage_total: f64 = stages.iter().map(|s| s.amount).sum();
        assert!((stage_total - metrics.total_pipeline).abs() < f64::EPSILON);
        assert_eq!(stages.len(), 2);
    }

    #[test]
    fn account_names_are_distinct_sorted_and_non_null() {
        let opps = vec![
            opp("1", Some("Globex"), "Discovery", 1.0, 1.0),
            opp("2", Some("Acme"), "Discovery", 1.0, 1.0),
            opp("3", Some("Acme"), "Proposal", 1.0, 1.0),
            opp("4", None, "Proposal", 1.0, 1.0),
        ];
        assert_eq!(opportunity_account_names(&opps), vec!["Acme", "Globex"]);
    }

    #[test]
    fn account_filters_match_exactly() {
        let opps = vec![
            opp("1", Some("Acme"), "Discovery", 1.0, 1.0),
            opp("2", Some("Acme Corp"), "Discovery", 1.0, 1.0),
        ];
        assert_eq!(opportunities_for_account(&opps, "Acme").len(), 1);
        assert!(opportunities_for_account(&opps, "acme").is_empty());
    }
}
