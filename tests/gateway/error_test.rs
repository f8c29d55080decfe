//! Gateway error recovery: every failure becomes inline display text.

use async_trait::async_trait;
use dealdesk::gateway::{classify_error_body, CompletionGateway, GatewayError};

/// A gateway that always fails with a configurable error.
struct FailingGateway {
    error: fn() -> GatewayError,
}

#[async_trait]
impl CompletionGateway for FailingGateway {
    async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
        Err((self.error)())
    }
}

/// A gateway that always succeeds.
struct EchoGateway;

#[async_trait]
impl CompletionGateway for EchoGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        Ok(format!("echo: {prompt}"))
    }
}

#[tokio::test]
async fn ask_passes_successful_text_through() {
    let text = EchoGateway.ask("hello").await;
    assert_eq!(text, "echo: hello");
}

#[tokio::test]
async fn api_error_message_displays_verbatim() {
    let gateway = FailingGateway {
        error: || GatewayError::Api("rate limit".to_owned()),
    };
    assert_eq!(gateway.ask("any prompt").await, "AI Error: rate limit");
}

#[tokio::test]
async fn http_status_error_displays_with_prefix() {
    let gateway = FailingGateway {
        error: || GatewayError::HttpStatus {
            status: 503,
            body: "service unavailable".to_owned(),
        },
    };
    assert_eq!(
        gateway.ask("any prompt").await,
        "AI Error: status 503: service unavailable"
    );
}

#[tokio::test]
async fn parse_error_displays_with_prefix() {
    let gateway = FailingGateway {
        error: || GatewayError::Parse("missing choices[0]".to_owned()),
    };
    assert_eq!(
        gateway.ask("any prompt").await,
        "AI Error: malformed response: missing choices[0]"
    );
}

#[test]
fn structured_api_body_yields_bare_message() {
    let err = classify_error_body(429, r#"{"error": {"message": "rate limit"}}"#);
    assert!(matches!(err, GatewayError::Api(_)));
    assert_eq!(err.to_string(), "rate limit");
}

#[test]
fn empty_structured_message_falls_back_to_status() {
    let err = classify_error_body(429, r#"{"error": {"message": "  "}}"#);
    assert!(matches!(err, GatewayError::HttpStatus { status: 429, .. }));
}

#[test]
fn long_unstructured_body_is_truncated() {
    let body = "x".repeat(1000);
    let err = classify_error_body(500, &body);
    let rendered = err.to_string();
    assert!(rendered.contains("[truncated]"));
    assert!(rendered.len() < body.len());
}
