use std::time::Duration;

use thiserror::Error;
use ytinsight_core::SourceError;

/// Errors from the LLM completion collaborator.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM request timed out")]
    Timeout,

    #[error("LLM rejected credentials (status {0})")]
    Auth(u16),

    #[error("LLM quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Non-2xx reply. `retry_after` carries the provider's `Retry-After` hint.
    #[error("LLM returned status {status}: {message}")]
    Status {
        status: u16,
        message: String,
        retry_after: Option<Duration>,
    },

    #[error("LLM response contained no completion text")]
    EmptyResponse,

    #[error("LLM response deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Reasons a model reply could not be turned into an insight record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reply contains no JSON object")]
    NoJsonObject,

    #[error("reply JSON does not match the insight schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Failures of a full analysis run.
///
/// `UpstreamUnavailable` and `MalformedUpstreamResponse` never leave
/// [`crate::CommentAnalyzer::analyze`]; they are logged and replaced by the
/// empty insight record. `EmptyInput` and `Source` propagate to the caller.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no comments available to analyze")]
    EmptyInput,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("LLM unavailable: {0}")]
    UpstreamUnavailable(#[from] LlmError),

    #[error("malformed LLM response: {0}")]
    MalformedUpstreamResponse(#[from] ParseError),
}
