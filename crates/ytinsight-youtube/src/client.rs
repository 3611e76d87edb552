//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API key management, Google error-envelope decoding
//! and typed response deserialization. Implements [`CommentSource`] so the
//! analyzer can consume it through the collaborator trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use ytinsight_core::{normalize_comments, CommentBatch, CommentSource, SourceError, VideoInfo};

use crate::error::YoutubeError;
use crate::normalize::{thread_to_raw_comment, video_item_to_info};
use crate::types::{CommentThreadListResponse, ErrorEnvelope, VideoListResponse};
use crate::video_id::extract_video_id;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Maximum `maxResults` accepted by `commentThreads.list`.
const PAGE_SIZE: usize = 100;

/// Client for the YouTube Data API.
///
/// Use [`YoutubeClient::new`] for production or [`YoutubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed. An unparseable `base_url` yields
    /// [`YoutubeError::Api`] with status 0.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ytinsight/0.1 (comment-analysis)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::Api {
            status: 0,
            reason: None,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches title and statistics for a video.
    ///
    /// Returns `Ok(None)` when the API knows no such (public) video.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] on a non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body does not match the expected shape.
    pub async fn get_video_info(&self, video_id: &str) -> Result<Option<VideoInfo>, YoutubeError> {
        let url = self.build_url("videos", &[("part", "snippet,statistics"), ("id", video_id)]);
        let response: VideoListResponse = self.request_json(&url, "videos.list").await?;
        Ok(response.items.into_iter().next().map(video_item_to_info))
    }

    /// Fetches up to `max_comments` top-level comments in relevance order,
    /// following `nextPageToken` across pages.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] on a non-2xx status (e.g. 403 `commentsDisabled`).
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if a page does not match the expected shape.
    pub async fn get_comments(
        &self,
        video_id: &str,
        max_comments: usize,
    ) -> Result<CommentBatch, YoutubeError> {
        let mut raw = Vec::new();
        let mut page_token: Option<String> = None;

        while raw.len() < max_comments {
            let page_size = (max_comments - raw.len()).min(PAGE_SIZE).to_string();
            let mut params = vec![
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", page_size.as_str()),
                ("order", "relevance"),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let url = self.build_url("commentThreads", &params);
            let page: CommentThreadListResponse =
                self.request_json(&url, "commentThreads.list").await?;

            tracing::debug!(
                video_id,
                page_items = page.items.len(),
                collected = raw.len(),
                "fetched comment page"
            );

            raw.extend(page.items.into_iter().map(thread_to_raw_comment));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        raw.truncate(max_comments);
        Ok(normalize_comments(raw))
    }

    /// Builds an endpoint URL with percent-encoded query parameters and the API key.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request and decodes either the typed body or the Google
    /// error envelope.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

fn api_error(status: u16, body: &str) -> YoutubeError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => YoutubeError::Api {
            status,
            reason: envelope.error.errors.into_iter().find_map(|d| d.reason),
            message: envelope.error.message,
        },
        Err(_) => YoutubeError::Api {
            status,
            reason: None,
            message: body.chars().take(200).collect(),
        },
    }
}

fn resolve_video_id(video_ref: &str) -> Result<String, YoutubeError> {
    extract_video_id(video_ref).ok_or_else(|| YoutubeError::InvalidVideoRef(video_ref.to_string()))
}

#[async_trait]
impl CommentSource for YoutubeClient {
    async fn fetch_video_info(&self, video_ref: &str) -> Result<VideoInfo, SourceError> {
        let video_id = resolve_video_id(video_ref)?;
        match self.get_video_info(&video_id).await {
            Ok(Some(info)) => Ok(info),
            Ok(None) => Err(SourceError::NotFound),
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "video info fetch failed");
                Err(e.into())
            }
        }
    }

    async fn fetch_comments(
        &self,
        video_ref: &str,
        max_comments: usize,
    ) -> Result<CommentBatch, SourceError> {
        let video_id = resolve_video_id(video_ref)?;
        self.get_comments(&video_id, max_comments)
            .await
            .map_err(|e| {
                tracing::warn!(video_id = %video_id, error = %e, "comment fetch failed");
                e.into()
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
