//! Template content checks for the four view prompts.

use chrono::NaiveDate;
use dealdesk::data::analytics::StageSummary;
use dealdesk::data::{Contact, Opportunity};
use dealdesk::prompts::{
    assistant_answer, meeting_brief, outreach_email, pipeline_insights, Tone,
    ASSISTANT_CONTEXT_ROWS,
};

fn opportunity(id: &str, account: Option<&str>, stage: &str, amount: f64) -> Opportunity {
    Opportunity {
        opportunity_id: id.to_owned(),
        account_id: format!("a-{id}"),
        amount,
        probability: 50.0,
        stage: stage.to_owned(),
        close_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        account_name: account.map(str::to_owned),
    }
}

fn contact(name: &str, email: &str) -> Contact {
    Contact {
        contact_id: format!("c-{name}"),
        account_id: "a1".to_owned(),
        contact_name: name.to_owned(),
        email: email.to_owned(),
        account_name: Some("Acme".to_owned()),
    }
}

#[test]
fn insight_prompt_embeds_stage_table_and_instruction() {
    let stages = vec![
        StageSummary {
            stage: "Discovery".to_owned(),
            amount: 3000.0,
        },
        StageSummary {
            stage: "Negotiation".to_owned(),
            amount: 12000.0,
        },
    ];
    let prompt = pipeline_insights(&stages);
    assert!(prompt.starts_with("Analyze this sales pipeline data and provide 3 actionable insights:"));
    assert!(prompt.contains("Discovery"));
    assert!(prompt.contains("12000"));
    assert!(prompt.ends_with("Focus on opportunities, risks, and next actions."));
}

#[test]
fn assistant_prompt_embeds_question_verbatim() {
    let opps = vec![opportunity("o1", Some("Acme"), "Discovery", 1000.0)];
    let question = "Which accounts close in Q3? (top 5, by amount)";
    let prompt = assistant_answer(&opps, question);
    assert!(prompt.contains(&format!("Question: {question}")));
    assert!(prompt.contains("Sales Data (top 20 opportunities):"));
    assert!(prompt.ends_with("Answer concisely with specific numbers and recommendations."));
}

#[test]
fn assistant_context_has_four_named_columns() {
    let opps = vec![opportunity("o1", Some("Acme"), "Proposal", 2500.5)];
    let prompt = assistant_answer(&opps, "anything");
    let header = prompt
        .lines()
        .find(|l| l.starts_with("account_name"))
        .unwrap();
    let columns: Vec<&str> = header.split_whitespace().collect();
    assert_eq!(columns, vec!["account_name", "stage", "amount", "probability"]);
    assert!(prompt.contains("2500.50"));
}

#[test]
fn assistant_context_is_capped_at_twenty_rows() {
    let opps: Vec<Opportunity> = (0..22)
        .map(|i| opportunity(&format!("o{i}"), Some("Acme"), "Discovery", 1000.0))
        .collect();
    let prompt = assistant_answer(&opps, "how many deals?");
    let data_rows = prompt.lines().filter(|l| l.starts_with("Acme")).count();
    assert_eq!(data_rows, ASSISTANT_CONTEXT_ROWS);
}

#[test]
fn assistant_context_renders_placeholder_for_missing_account() {
    let opps = vec![opportunity("o1", None, "Discovery", 1000.0)];
    let prompt = assistant_answer(&opps, "anything");
    assert!(prompt.lines().any(|l| l.starts_with("- ")));
}

#[test]
fn meeting_brief_names_the_account_and_lists_contacts() {
    let o1 = opportunity("o1", Some("Acme"), "Negotiation", 8000.0);
    let c1 = contact("Ana Ruiz", "ana@acme.example");
    let prompt = meeting_brief("Acme", &[&o1], &[&c1]);
    assert!(prompt.starts_with("MEETING BRIEF for Acme"));
    assert!(prompt.contains("Negotiation"));
    assert!(prompt.contains("2025-06-30"));
    assert!(prompt.contains("ana@acme.example"));
    assert!(prompt.contains("1. Account status summary"));
    assert!(prompt.contains("3. Next action recommendations"));
}

#[test]
fn meeting_brief_marks_missing_contacts_with_literal() {
    let o1 = opportunity("o1", Some("Acme"), "Discovery", 1000.0);
    let prompt = meeting_brief("Acme", &[&o1], &[]);
    assert!(prompt.contains("Contacts:\nNo contacts"));
    assert!(!prompt.contains("contact_name"));
}

#[test]
fn outreach_prompt_lowercases_tone_and_embeds_fields() {
    let prompt = outreach_email(Tone::Friendly, "Ana Ruiz", "Acme", "renewal check-in");
    assert!(prompt.starts_with("Write a friendly sales email to Ana Ruiz at Acme."));
    assert!(prompt.contains("Purpose: renewal check-in"));
    assert!(prompt.contains("Keep under 150 words."));
    assert!(prompt.ends_with("From: Your Name, Sales Manager at Your Company"));
}
