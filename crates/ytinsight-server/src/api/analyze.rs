use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use ytinsight_analyzer::{AnalysisError, VideoAnalysis};
use ytinsight_core::SourceError;
use ytinsight_youtube::extract_video_id;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    url: Option<String>,
}

pub(super) async fn analyze_video(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<VideoAnalysis>>, ApiError> {
    let url = payload
        .ok()
        .and_then(|Json(body)| body.url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "YouTube URL is required"))?;

    let Some(video_id) = extract_video_id(&url) else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "Invalid YouTube URL format",
        ));
    };

    tracing::info!(request_id = %req_id.0, video_id = %video_id, "analyzing video");

    let analysis = ytinsight_analyzer::analyze_video(
        state.source.as_ref(),
        &state.analyzer,
        &video_id,
        state.max_comments,
    )
    .await
    .map_err(|e| map_analysis_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: analysis,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::EmptyInput => ApiError::new(
            request_id,
            "no_comments",
            "No comments found for this video",
        ),
        AnalysisError::Source(SourceError::NotFound) => {
            ApiError::new(request_id, "not_found", "Video not found or is private")
        }
        AnalysisError::Source(SourceError::CommentsDisabled) => ApiError::new(
            request_id,
            "comments_disabled",
            "Comments are disabled for this video",
        ),
        AnalysisError::Source(SourceError::QuotaExceeded) => ApiError::new(
            request_id,
            "rate_limited",
            "YouTube API quota exceeded, try again later",
        ),
        other => {
            tracing::error!(error = %other, "video analysis failed");
            ApiError::new(
                request_id,
                "upstream_error",
                "Failed to fetch data from YouTube",
            )
        }
    }
}
