//! Groq wire format tests.

use dealdesk::config::ModelConfig;
use dealdesk::gateway::groq::{build_request, parse_response};
use serde_json::json;

#[test]
fn build_request_uses_fixed_invocation_parameters() {
    let model = ModelConfig::default();
    let req = build_request(&model, "Analyze this pipeline");

    assert_eq!(req.model, "openai/gpt-oss-120b");
    assert!((req.temperature - 0.4).abs() < f64::EPSILON);
    assert_eq!(req.max_tokens, 1000);

    // Single-turn: exactly one user-role message, no system prompt.
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, "user");
    assert_eq!(req.messages[0].content, "Analyze this pipeline");
}

#[test]
fn request_serializes_with_expected_field_names() {
    let model = ModelConfig::default();
    let req = build_request(&model, "hello");
    let value = serde_json::to_value(&req).expect("serializes");

    assert_eq!(value["model"], "openai/gpt-oss-120b");
    assert_eq!(value["temperature"], 0.4);
    assert_eq!(value["max_tokens"], 1000);
    assert_eq!(value["messages"][0]["role"], "user");
}

#[test]
fn parse_response_returns_first_choice_text() {
    let body = json!({
        "choices": [
            {"message": {"role": "assistant", "content": "Insight one."}},
            {"message": {"role": "assistant", "content": "ignored"}}
        ]
    });
    let text = parse_response(&body.to_string()).expect("parses");
    assert_eq!(text, "Insight one.");
}

#[test]
fn parse_response_rejects_missing_choices() {
    let err = parse_response(r#"{"choices": []}"#).expect_err("must fail");
    assert!(err.to_string().contains("choices[0]"));
}

#[test]
fn parse_response_rejects_non_json_body() {
    assert!(parse_response("<html>oops</html>").is_err());
}
