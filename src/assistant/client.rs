//! Chat-completions client for OpenAI-compatible APIs.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::BotSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors returned by a completion backend.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response contained no answer")]
    EmptyResponse,
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generates a completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Client for the `/v1/chat/completions` endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Secret<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Creates a client from the API key and bot settings.
    #[must_use]
    pub fn new(api_key: Secret<String>, settings: &BotSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: settings.api_base_url.trim_end_matches('/').to_owned(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
        }
    }

    /// Model sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending completion request");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or(AssistantError::EmptyResponse)
    }
}
