//! CSV loading, normalization, and left-join behavior.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use dealdesk::config::DataConfig;
use dealdesk::data::loader::load_dataset;
use tempfile::TempDir;

fn write_fixture(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("fixture write");
}

fn standard_fixtures(dir: &Path) {
    write_fixture(
        dir,
        "accounts.csv",
        "ID,NAME\n\
         a1,Acme\n\
         a2,Globex\n\
         a3,Initech\n",
    );
    write_fixture(
        dir,
        "opportunities.csv",
        "ID,ACCOUNT_ID,AMOUNT,PROBABILITY,STAGE_NAME,CLOSE_DATE\n\
         o1,a1,1000,50,Discovery,2026-09-01\n\
         o2,a1,2000,50,Proposal,2026-09-15\n\
         o3,a2,3000,50,Discovery,2026-10-01\n\
         o4,a2,4000,50,Negotiation,2026-10-15\n\
         o5,a3,5000,50,Proposal,2026-11-01\n",
    );
    write_fixture(
        dir,
        "contacts.csv",
        "ID,ACCOUNT_ID,NAME,EMAIL\n\
         c1,a1,Ana Alvarez,ana@acme.test\n\
         c2,a2,Bo Berg,bo@globex.test\n",
    );
    write_fixture(
        dir,
        "tasks.csv",
        "ID,ACCOUNT_ID,ACTIVITY_DATE\n\
         t1,a1,2026-08-20\n\
         t2,a9,2026-08-21\n",
    );
}

fn config_for(dir: &TempDir) -> DataConfig {
    DataConfig {
        dir: dir.path().to_path_buf(),
        ..DataConfig::default()
    }
}

#[test]
fn load_normalizes_columns_and_joins_account_names() {
    let dir = TempDir::new().expect("tempdir");
    standard_fixtures(dir.path());

    let dataset = load_dataset(&config_for(&dir)).expect("load succeeds");

    assert_eq!(dataset.accounts.len(), 3);
    assert_eq!(dataset.opportunities.len(), 5);

    let first = &dataset.opportunities[0];
    assert_eq!(first.opportunity_id, "o1");
    assert_eq!(first.stage, "Discovery");
    assert_eq!(first.account_name.as_deref(), Some("Acme"));
    assert_eq!(
        first.close_date,
        NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date")
    );

    let contact = &dataset.contacts[0];
    assert_eq!(contact.contact_name, "Ana Alvarez");
    assert_eq!(contact.account_name.as_deref(), Some("Acme"));
}

#[test]
fn left_join_preserves_rows_with_unmatched_accounts() {
    let dir = TempDir::new().expect("tempdir");
    standard_fixtures(dir.path());
    // o6 references an account id with no match in the accounts table.
    write_fixture(
        dir.path(),
        "opportunities.csv",
        "ID,ACCOUNT_ID,AMOUNT,PROBABILITY,STAGE_NAME,CLOSE_DATE\n\
         o1,a1,1000,50,Discovery,2026-09-01\n\
         o6,missing,9999,10,Discovery,2026-12-01\n",
    );

    let dataset = load_dataset(&config_for(&dir)).expect("load succeeds");

    // Same row count as the source: the unmatched row is kept, not dropped.
    assert_eq!(dataset.opportunities.len(), 2);
    let orphan = &dataset.opportunities[1];
    assert_eq!(orphan.account_id, "missing");
    assert_eq!(orphan.account_name, None);

    // Same for tasks: t2 references a9, which does not exist.
    assert_eq!(dataset.tasks.len(), 2);
    assert_eq!(dataset.tasks[1].account_name, None);
    assert_eq!(dataset.tasks[1].account_id.as_deref(), Some("a9"));
}

#[test]
fn task_optional_columns_may_be_absent() {
    let dir = TempDir::new().expect("tempdir");
    standard_fixtures(dir.path());
    write_fixture(dir.path(), "tasks.csv", "ID,SUBJECT\nt1,Call back\n");

    let dataset = load_dataset(&config_for(&dir)).expect("load succeeds");

    assert_eq!(dataset.tasks.len(), 1);
    let task = &dataset.tasks[0];
    assert_eq!(task.account_id, None);
    assert_eq!(task.activity_date, None);
    assert_eq!(task.account_name, None);
}

#[test]
fn task_date_column_is_parsed_when_present() {
    let dir = TempDir::new().expect("tempdir");
    standard_fixtures(dir.path());

    let dataset = load_dataset(&config_for(&dir)).expect("load succeeds");

    assert_eq!(
        dataset.tasks[0].activity_date,
        Some(NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date"))
    );
    assert_eq!(dataset.tasks[0].account_name.as_deref(), Some("Acme"));
}

#[test]
fn unparseable_close_date_fails_the_whole_load() {
    let dir = TempDir::new().expect("tempdir");
    standard_fixtures(dir.path());
    write_fixture(
        dir.path(),
        "opportunities.csv",
        "ID,ACCOUNT_ID,AMOUNT,PROBABILITY,STAGE_NAME,CLOSE_DATE\n\
         o1,a1,1000,50,Discovery,someday\n",
    );

    let err = load_dataset(&config_for(&dir)).expect_err("load must fail");
    assert!(err.to_string().contains("close date"));
}

#[test]
fn missing_input_file_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    standard_fixtures(dir.path());
    fs::remove_file(dir.path().join("contacts.csv")).expect("remove fixture");

    assert!(load_dataset(&config_for(&dir)).is_err());
}

#[test]
fn malformed_numeric_column_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    standard_fixtures(dir.path());
    write_fixture(
        dir.path(),
        "opportunities.csv",
        "ID,ACCOUNT_ID,AMOUNT,PROBABILITY,STAGE_NAME,CLOSE_DATE\n\
         o1,a1,lots,50,Discovery,2026-09-01\n",
    );

    assert!(load_dataset(&config_for(&dir)).is_err());
}
