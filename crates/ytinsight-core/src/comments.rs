//! Comment domain types and normalization of upstream comment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single public comment, validated and ready for analysis.
///
/// `text` is kept exactly as the upstream source delivered it: it may be
/// empty or contain markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub author: String,
    pub like_count: u64,
    pub reply_count: u64,
    pub published_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Builds a comment with no engagement counts and no timestamp.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: String::new(),
            like_count: 0,
            reply_count: 0,
            published_at: None,
        }
    }
}

/// Comments in upstream relevance order. Order decides which comments are
/// sampled for analysis.
pub type CommentBatch = Vec<Comment>;

/// A comment record as handed over by a comment source, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComment {
    pub text: Option<String>,
    pub author: Option<String>,
    pub like_count: Option<i64>,
    pub reply_count: Option<i64>,
    pub published_at: Option<String>,
}

/// Basic metadata for a video as reported by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub channel_title: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: Option<DateTime<Utc>>,
}

/// Validates raw comment records into a [`CommentBatch`].
///
/// Records without `text` are dropped; everything else keeps its relative
/// order. Missing authors become empty strings, missing or negative counts
/// become `0`, and timestamps that are not RFC 3339 become `None`.
#[must_use]
pub fn normalize_comments(raw: Vec<RawComment>) -> CommentBatch {
    let total = raw.len();
    let batch: CommentBatch = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| normalize_comment(index, record))
        .collect();

    if batch.len() != total {
        tracing::debug!(
            received = total,
            kept = batch.len(),
            "dropped comment records without text"
        );
    }

    batch
}

fn normalize_comment(index: usize, record: RawComment) -> Option<Comment> {
    let Some(text) = record.text else {
        tracing::warn!(index, "comment record has no text, skipping");
        return None;
    };

    Some(Comment {
        text,
        author: record.author.unwrap_or_default(),
        like_count: non_negative(record.like_count),
        reply_count: non_negative(record.reply_count),
        published_at: record.published_at.as_deref().and_then(parse_timestamp),
    })
}

fn non_negative(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

/// Parses an RFC 3339 timestamp into UTC.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
