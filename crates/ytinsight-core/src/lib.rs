//! Shared configuration and domain types for ytinsight.

pub mod app_config;
pub mod comments;
pub mod config;
pub mod source;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use comments::{normalize_comments, Comment, CommentBatch, RawComment, VideoInfo};
pub use config::{load_app_config, load_app_config_from_env};
pub use source::{CommentSource, SourceError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
