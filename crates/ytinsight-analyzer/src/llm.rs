//! LLM completion collaborator and its OpenAI-compatible HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::retry::retry_with_backoff;
use crate::types::SamplingConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Produces a text completion for a system + user message pair.
#[async_trait]
pub trait LlmCompletion: Send + Sync {
    /// Returns the model's reply text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, LlmError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Use [`OpenAiClient::new`] for production or [`OpenAiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
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
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Creates a client pointed at the public OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client for any OpenAI-compatible base URL, e.g.
    /// `http://localhost:11434/v1` or a wiremock server.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ytinsight/0.1 (comment-analysis)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables bounded retry of transient failures.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Sends one completion request and extracts the first choice's text.
    async fn send_once(&self, request: &ChatRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, retry_after, &body));
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl LlmCompletion for OpenAiClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &sampling.model,
            temperature: sampling.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: sampling.max_tokens,
        };

        let request = &request;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || {
            self.send_once(request)
        })
        .await
    }
}

/// Maps a non-2xx response to an [`LlmError`], pulling the provider's
/// `error.message` out of the body when present.
fn status_error(status: StatusCode, retry_after: Option<Duration>, body: &str) -> LlmError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.chars().take(200).collect());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(status.as_u16()),
        StatusCode::TOO_MANY_REQUESTS => LlmError::QuotaExceeded(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Timeout,
        _ => LlmError::Status {
            status: status.as_u16(),
            message,
            retry_after,
        },
    }
}

/// Reads a delay-seconds `Retry-After` header. HTTP-date values are ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
