use thiserror::Error;
use ytinsight_core::SourceError;

/// Errors returned by the YouTube Data API client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status and a Google error envelope.
    #[error("YouTube API error {status} ({}): {message}", .reason.as_deref().unwrap_or("unknown"))]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The reference is neither a recognised video URL nor a bare video ID.
    #[error("invalid video reference: {0}")]
    InvalidVideoRef(String),
}

const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "rateLimitExceeded",
    "dailyLimitExceeded",
    "userRateLimitExceeded",
];

impl From<YoutubeError> for SourceError {
    fn from(err: YoutubeError) -> Self {
        match err {
            YoutubeError::InvalidVideoRef(_) => SourceError::NotFound,
            YoutubeError::Api { status: 404, .. } => SourceError::NotFound,
            YoutubeError::Api { status: 429, .. } => SourceError::QuotaExceeded,
            YoutubeError::Api {
                status: 403,
                reason,
                ..
            } => {
                if reason
                    .as_deref()
                    .is_some_and(|r| QUOTA_REASONS.contains(&r))
                {
                    SourceError::QuotaExceeded
                } else {
                    // commentsDisabled, forbidden and unlabelled 403s all mean
                    // the comments cannot be read for this video.
                    SourceError::CommentsDisabled
                }
            }
            other => SourceError::Transport(other.to_string()),
        }
    }
}
