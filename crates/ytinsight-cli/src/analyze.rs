//! `analyze` and `video-id` command handlers.

use std::sync::Arc;

use anyhow::Context;
use ytinsight_analyzer::{
    analyze_video, AnalysisError, CommentAnalyzer, OpenAiClient, SamplingConfig, VideoAnalysis,
};
use ytinsight_core::{AppConfig, SourceError};
use ytinsight_youtube::{extract_video_id, YoutubeClient};

/// Extracts the video ID or fails with a user-facing message.
///
/// # Errors
///
/// Returns an error if `url` is not a recognised YouTube URL or bare ID.
pub(crate) fn resolve_video_id(url: &str) -> anyhow::Result<String> {
    extract_video_id(url).ok_or_else(|| anyhow::anyhow!("invalid YouTube URL format: '{url}'"))
}

/// Runs the full fetch-and-analyze flow for one video and prints the JSON result.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the URL is invalid, the
/// video cannot be read, or it has no comments. LLM failures do not error;
/// they yield an empty analysis.
pub(crate) async fn run_analyze(
    url: &str,
    max_comments: Option<u32>,
    compact: bool,
) -> anyhow::Result<()> {
    let video_id = resolve_video_id(url)?;
    let config = ytinsight_core::load_app_config().context("failed to load configuration")?;
    let max_comments = match max_comments {
        Some(n) => usize::try_from(n)?,
        None => config.max_comments,
    };

    let source = YoutubeClient::new(&config.youtube_api_key, config.youtube_timeout_secs)?;
    let analyzer = build_analyzer(&config)?;

    tracing::info!(video_id = %video_id, max_comments, "starting analysis");

    let analysis = analyze_video(&source, &analyzer, &video_id, max_comments)
        .await
        .map_err(|e| describe_failure(&e))?;

    println!("{}", render(&analysis, compact)?);
    Ok(())
}

fn build_analyzer(config: &AppConfig) -> anyhow::Result<CommentAnalyzer> {
    let llm = OpenAiClient::with_base_url(
        &config.openai_api_key,
        config.llm_timeout_secs,
        &config.llm_base_url,
    )?
    .with_retries(config.llm_max_retries, config.llm_retry_backoff_base_ms);

    Ok(
        CommentAnalyzer::new(Arc::new(llm)).with_sampling(SamplingConfig {
            model: config.llm_model.clone(),
            ..SamplingConfig::default()
        }),
    )
}

fn describe_failure(error: &AnalysisError) -> anyhow::Error {
    match error {
        AnalysisError::EmptyInput => anyhow::anyhow!("no comments found for this video"),
        AnalysisError::Source(SourceError::NotFound) => {
            anyhow::anyhow!("video not found or is private")
        }
        AnalysisError::Source(SourceError::CommentsDisabled) => {
            anyhow::anyhow!("comments are disabled for this video")
        }
        AnalysisError::Source(SourceError::QuotaExceeded) => {
            anyhow::anyhow!("YouTube API quota exceeded, try again later")
        }
        other => anyhow::anyhow!("analysis failed: {other}"),
    }
}

fn render(analysis: &VideoAnalysis, compact: bool) -> anyhow::Result<String> {
    let json = if compact {
        serde_json::to_string(analysis)?
    } else {
        serde_json::to_string_pretty(analysis)?
    };
    Ok(json)
}
