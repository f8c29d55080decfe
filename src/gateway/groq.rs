//! Groq chat-completions client (`/openai/v1/chat/completions`).

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::credentials::ApiKey;

use super::{check_http_response, CompletionGateway, GatewayError};

const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1/chat/completions";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Chat completions API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation messages. Always a single user-role entry here.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum completion tokens.
    pub max_tokens: u32,
}

/// A message in chat format.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    /// Role (always `user` for this gateway).
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// Chat completions API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Response choices.
    pub choices: Vec<ChatChoice>,
}

/// A response choice.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// Assistant message for this choice.
    pub message: ChatResponseMessage,
}

/// Assistant message payload.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    /// Text content.
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build a single-turn chat request from a prompt.
#[doc(hidden)]
pub fn build_request(model: &ModelConfig, prompt: &str) -> ChatRequest {
    ChatRequest {
        model: model.id.clone(),
        messages: vec![ChatMessage {
            role: "user".to_owned(),
            content: prompt.to_owned(),
        }],
        temperature: model.temperature,
        max_tokens: model.max_tokens,
    }
}

/// Parse a chat completions response into the first choice's text.
///
/// # Errors
///
/// Returns `GatewayError::Parse` when the body cannot be deserialized or the
/// first choice carries no content.
#[doc(hidden)]
pub fn parse_response(body: &str) -> Result<String, GatewayError> {
    let resp: ChatResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Parse(e.to_string()))?;

    resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::Parse("missing choices[0].message.content".to_owned()))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Groq API client.
///
/// Constructed once at startup and reused for every call; the inner
/// `reqwest::Client` pools connections. No timeout beyond the transport's
/// defaults, no retry.
#[derive(Debug, Clone)]
pub struct GroqClient {
    model: ModelConfig,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl GroqClient {
    /// Create a new client with fixed invocation parameters.
    pub fn new(model: ModelConfig, api_key: ApiKey) -> Self {
        Self {
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// The configured model identifier.
    pub fn model_id(&self) -> &str {
        &self.model.id
    }
}

#[async_trait::async_trait]
impl CompletionGateway for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let api_request = build_request(&self.model, prompt);

        let response = self
            .client
            .post(GROQ_API_BASE)
            .header("content-type", "application/json")
            .header(
                "authorization",
                format!("Bearer {}", self.api_key.expose()),
            )
            .json(&api_request)
            .send()
            .await?;

        let payload = check_http_response(response).await?;
        parse_response(&payload)
    }
}
