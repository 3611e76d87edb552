//! Conversion of YouTube API types into ytinsight domain types.

use ytinsight_core::comments::parse_timestamp;
use ytinsight_core::{RawComment, VideoInfo};

use crate::types::{CommentThread, VideoItem};

/// Maps a comment thread to the raw record handed to the comment normalizer.
#[must_use]
pub fn thread_to_raw_comment(thread: CommentThread) -> RawComment {
    let reply_count = thread.snippet.total_reply_count;
    let snippet = thread.snippet.top_level_comment.snippet;
    RawComment {
        text: snippet.text_display,
        author: snippet.author_display_name,
        like_count: snippet.like_count,
        reply_count,
        published_at: snippet.published_at,
    }
}

/// Maps a `videos.list` item to [`VideoInfo`]. Unparseable counters become `0`.
#[must_use]
pub fn video_item_to_info(item: VideoItem) -> VideoInfo {
    let count = |raw: Option<&str>| raw.and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);

    VideoInfo {
        title: item.snippet.title,
        channel_title: item.snippet.channel_title,
        view_count: count(item.statistics.view_count.as_deref()),
        like_count: count(item.statistics.like_count.as_deref()),
        comment_count: count(item.statistics.comment_count.as_deref()),
        published_at: item.snippet.published_at.as_deref().and_then(parse_timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommentThreadListResponse, VideoListResponse};

    #[test]
    fn thread_maps_snippet_fields() {
        let body = serde_json::json!({
            "items": [{
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "textDisplay": "Loved it!",
                            "authorDisplayName": "@baker",
                            "likeCount": 12,
                            "publishedAt": "2024-03-02T10:00:00Z"
                        }
                    },
                    "totalReplyCount": 4
                }
            }]
        });
        let page: CommentThreadListResponse = serde_json::from_value(body).expect("parse");
        let raw = thread_to_raw_comment(page.items.into_iter().next().expect("item"));
        assert_eq!(raw.text.as_deref(), Some("Loved it!"));
        assert_eq!(raw.author.as_deref(), Some("@baker"));
        assert_eq!(raw.like_count, Some(12));
        assert_eq!(raw.reply_count, Some(4));
    }

    #[test]
    fn video_item_parses_string_counters() {
        let body = serde_json::json!({
            "items": [{
                "snippet": {
                    "title": "Bread 101",
                    "channelTitle": "Bakery",
                    "publishedAt": "2024-01-01T00:00:00Z"
                },
                "statistics": {
                    "viewCount": "1500",
                    "likeCount": "oops",
                    "commentCount": "42"
                }
            }]
        });
        let list: VideoListResponse = serde_json::from_value(body).expect("parse");
        let info = video_item_to_info(list.items.into_iter().next().expect("item"));
        assert_eq!(info.title, "Bread 101");
        assert_eq!(info.view_count, 1500);
        assert_eq!(info.like_count, 0);
        assert_eq!(info.comment_count, 42);
        assert!(info.published_at.is_some());
    }

    #[test]
    fn missing_statistics_default_to_zero() {
        let body = serde_json::json!({
            "items": [{ "snippet": { "title": "Quiet video" } }]
        });
        let list: VideoListResponse = serde_json::from_value(body).expect("parse");
        let info = video_item_to_info(list.items.into_iter().next().expect("item"));
        assert_eq!(info.comment_count, 0);
        assert_eq!(info.channel_title, "");
    }
}
