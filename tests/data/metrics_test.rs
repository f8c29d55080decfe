//! Pipeline aggregates over a loaded dataset.

use std::fs;

use dealdesk::config::DataConfig;
use dealdesk::data::analytics::{
    pipeline_metrics, stage_summary, weighted_amount,
};
use dealdesk::data::loader::load_dataset;
use tempfile::TempDir;

fn fixtures() -> (TempDir, DataConfig) {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("accounts.csv"),
        "ID,NAME\na1,Acme\na2,Globex\na3,Initech\n",
    )
    .expect("fixture write");
    fs::write(
        dir.path().join("opportunities.csv"),
        "ID,ACCOUNT_ID,AMOUNT,PROBABILITY,STAGE_NAME,CLOSE_DATE\n\
         o1,a1,1000,50,Discovery,2026-09-01\n\
         o2,a1,2000,50,Proposal,2026-09-15\n\
         o3,a2,3000,50,Discovery,2026-10-01\n\
         o4,a2,4000,50,Negotiation,2026-10-15\n\
         o5,a3,5000,50,Proposal,2026-11-01\n",
    )
    .expect("fixture write");
    fs::write(dir.path().join("contacts.csv"), "ID,ACCOUNT_ID,NAME,EMAIL\n")
        .expect("fixture write");
    fs::write(dir.path().join("tasks.csv"), "ID\n").expect("fixture write");

    let config = DataConfig {
        dir: dir.path().to_path_buf(),
        ..DataConfig::default()
    };
    (dir, config)
}

#[test]
fn example_dataset_metrics_match_expected_totals() {
    let (_dir, config) = fixtures();
    let dataset = load_dataset(&config).expect("load succeeds");

    let metrics = pipeline_metrics(&dataset.opportunities);
    assert!((metrics.total_pipeline - 15000.0).abs() < f64::EPSILON);
    assert!((metrics.weighted_pipeline - 7500.0).abs() < f64::EPSILON);
    assert_eq!(metrics.active_deals, 5);
}

#[test]
fn weighted_amount_holds_for_every_row() {
    let (_dir, config) = fixtures();
    let dataset = load_dataset(&config).expect("load succeeds");

    for opp in &dataset.opportunities {
        let expected = opp.amount * (opp.probability / 100.0);
        assert!((weighted_amount(opp) - expected).abs() < f64::EPSILON);
    }
}

#[test]
fn stage_summary_partitions_the_total() {
    let (_dir, config) = fixtures();
    let dataset = load_dataset(&config).expect("load succeeds");

    let stages = stage_summary(&dataset.opportunities);
    let labels: Vec<&str> = stages.iter().map(|s| s.stage.as_str()).collect();
    assert_eq!(labels, vec!["Discovery", "Negotiation", "Proposal"]);

    let stage_total: f64 = stages.iter().map(|s| s.amount).sum();
    let metrics = pipeline_metrics(&dataset.opportunities);
    assert!((stage_total - metrics.total_pipeline).abs() < f64::EPSILON);
}
