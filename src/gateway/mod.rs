//! AI gateway abstraction.
//!
//! Defines the [`CompletionGateway`] trait and the shared error taxonomy.
//! One implementation exists: [`groq::GroqClient`], for the Groq
//! OpenAI-compatible `/openai/v1/chat/completions` API.
//!
//! The gateway boundary is where every network, auth, quota, and parse
//! failure is recovered: [`CompletionGateway::ask`] converts any error into
//! the inline string `"AI Error: <message>"` which the views display in
//! place of an answer. Nothing past this boundary ever raises.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

pub mod groq;

/// Errors produced by a completion gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP transport failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response did not match the expected schema.
    #[error("malformed response: {0}")]
    Parse(String),
    /// Upstream responded with an error status and no structured message.
    #[error("status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized raw response body.
        body: String,
    },
    /// Upstream reported a structured error message. Displayed verbatim, so
    /// a quota response surfaces as e.g. `AI Error: rate limit`.
    #[error("{0}")]
    Api(String),
}

/// Single-turn completion interface.
///
/// Implementations must be `Send + Sync`: calls run on spawned tasks so the
/// UI stays responsive while a request is in flight.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Request a completion for a single user-role prompt.
    ///
    /// No conversation history, no system prompt, no streaming.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, API, or parse failure.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Request a completion, recovering every failure into display text.
    ///
    /// Never fails: an error becomes the literal string
    /// `AI Error: <message>`, shown to the user as if it were an answer.
    async fn ask(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "gateway call failed");
                format!("AI Error: {e}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Structured error body shape used by OpenAI-compatible APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Check HTTP response status and return the body text or a gateway error.
///
/// # Errors
///
/// Returns [`GatewayError::Request`] on transport failure. On a non-2xx
/// status, returns [`GatewayError::Api`] carrying the upstream's own error
/// message when the body is a structured `{"error": {"message": …}}`
/// document, otherwise [`GatewayError::HttpStatus`] with a sanitized body.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, GatewayError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(classify_error_body(status.as_u16(), &body));
    }
    Ok(body)
}

/// Classify a non-2xx response body into a gateway error.
#[doc(hidden)]
pub fn classify_error_body(status: u16, body: &str) -> GatewayError {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = parsed.error.and_then(|e| e.message) {
            if !message.trim().is_empty() {
                return GatewayError::Api(message);
            }
        }
    }
    GatewayError::HttpStatus {
        status,
        body: sanitize_error_body(body),
    }
}

fn sanitize_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in [
        r"gsk_[A-Za-z0-9]{16,}",
        r"sk-[A-Za-z0-9]{32,}",
        r"Bearer [A-Za-z0-9_\-\.]{16,}",
    ] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}
