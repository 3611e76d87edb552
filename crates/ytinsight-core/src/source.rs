//! The comment source collaborator.

use async_trait::async_trait;
use thiserror::Error;

use crate::comments::{CommentBatch, VideoInfo};

/// Failures a comment source may report.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("video not found or is private")]
    NotFound,

    #[error("comments are disabled for this video")]
    CommentsDisabled,

    #[error("comment source quota exceeded")]
    QuotaExceeded,

    #[error("comment source transport error: {0}")]
    Transport(String),
}

/// Supplies video metadata and relevance-ordered comments for a video.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetches title and statistics for the referenced video.
    async fn fetch_video_info(&self, video_ref: &str) -> Result<VideoInfo, SourceError>;

    /// Fetches up to `max_comments` top-level comments, most relevant first.
    async fn fetch_comments(
        &self,
        video_ref: &str,
        max_comments: usize,
    ) -> Result<CommentBatch, SourceError>;
}
