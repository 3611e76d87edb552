//! Engagement statistics computed directly from comments.

use ytinsight_core::Comment;

use crate::types::{EngagementMetrics, Level};

/// Average length (characters) above which engagement counts as `high`.
pub(crate) const HIGH_QUALITY_MIN_LENGTH: f64 = 100.0;
/// Average length (characters) above which engagement counts as `medium`.
pub(crate) const MEDIUM_QUALITY_MIN_LENGTH: f64 = 50.0;

/// Score engagement for a comment batch.
///
/// Sums likes and replies and averages comment length in characters. The
/// quality rating compares the unrounded average against fixed thresholds
/// using strict `>`. Returns [`EngagementMetrics::zero`] for an empty batch.
#[must_use]
pub fn score_engagement(comments: &[Comment]) -> EngagementMetrics {
    if comments.is_empty() {
        return EngagementMetrics::zero();
    }

    let total_likes_on_comments = comments
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.like_count));
    let total_replies = comments
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.reply_count));

    let total_chars: usize = comments.iter().map(|c| c.text.chars().count()).sum();
    #[allow(clippy::cast_precision_loss)]
    let average = total_chars as f64 / comments.len() as f64;

    EngagementMetrics {
        total_likes_on_comments,
        total_replies,
        average_comment_length: round_to_tenth(average),
        engagement_quality: quality_for(average),
    }
}

fn quality_for(average_length: f64) -> Level {
    if average_length > HIGH_QUALITY_MIN_LENGTH {
        Level::High
    } else if average_length > MEDIUM_QUALITY_MIN_LENGTH {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Rounds half to even, so an average of 1.25 reports as 1.2.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
