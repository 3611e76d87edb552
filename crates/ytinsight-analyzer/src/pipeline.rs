//! Analysis orchestration.

use std::sync::Arc;

use ytinsight_core::{Comment, CommentSource};

use crate::engagement::score_engagement;
use crate::error::AnalysisError;
use crate::ideas::generate_video_ideas;
use crate::llm::LlmCompletion;
use crate::parser::parse_insight_record;
use crate::prompt::{build_prompt, sample_comments};
use crate::types::{AnalysisResult, EngagementMetrics, InsightRecord, SamplingConfig, VideoAnalysis};

/// Runs the comment-to-insight pipeline against an injected LLM collaborator.
#[derive(Clone)]
pub struct CommentAnalyzer {
    llm: Arc<dyn LlmCompletion>,
    sampling: SamplingConfig,
}

impl CommentAnalyzer {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmCompletion>) -> Self {
        Self {
            llm,
            sampling: SamplingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Analyze a comment batch for one video.
    ///
    /// 1. Empty batch: return the empty insight record and zero metrics
    ///    without calling the LLM.
    /// 2. Build the prompt from the first 50 comments and call the LLM.
    /// 3. Parse the reply. LLM and parse failures are logged and replaced by
    ///    the empty insight record.
    /// 4. Derive video ideas from the record.
    /// 5. Score engagement over the full batch.
    pub async fn analyze(&self, comments: &[Comment], video_title: &str) -> AnalysisResult {
        if comments.is_empty() {
            tracing::info!(video_title, "no comments to analyze, returning empty analysis");
            return AnalysisResult {
                comment_count: 0,
                analysis: InsightRecord::empty(),
                video_ideas: Vec::new(),
                engagement_metrics: EngagementMetrics::zero(),
            };
        }

        let analysis = match self.request_insights(comments, video_title).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    video_title,
                    error = %e,
                    "insight extraction failed, degrading to empty analysis"
                );
                InsightRecord::empty()
            }
        };

        let video_ideas = generate_video_ideas(&analysis, video_title);
        let engagement_metrics = score_engagement(comments);

        tracing::info!(
            video_title,
            comment_count = comments.len(),
            idea_count = video_ideas.len(),
            "comment analysis complete"
        );

        AnalysisResult {
            comment_count: comments.len(),
            analysis,
            video_ideas,
            engagement_metrics,
        }
    }

    async fn request_insights(
        &self,
        comments: &[Comment],
        video_title: &str,
    ) -> Result<InsightRecord, AnalysisError> {
        let prompt = build_prompt(comments, video_title);
        tracing::debug!(
            sampled = sample_comments(comments).len(),
            model = %self.sampling.model,
            "requesting comment insights"
        );

        let reply = self
            .llm
            .complete(&prompt.system, &prompt.user, &self.sampling)
            .await?;
        let record = parse_insight_record(&reply)?;
        Ok(record)
    }
}

/// Fetch and analyze the comments of one video.
///
/// 1. Fetch video metadata; a video reporting zero comments stops here.
/// 2. Fetch up to `max_comments` comments in relevance order.
/// 3. Run [`CommentAnalyzer::analyze`] on them.
///
/// # Errors
///
/// - [`AnalysisError::Source`] when the comment source fails.
/// - [`AnalysisError::EmptyInput`] when the video has no comments to analyze.
pub async fn analyze_video(
    source: &dyn CommentSource,
    analyzer: &CommentAnalyzer,
    video_ref: &str,
    max_comments: usize,
) -> Result<VideoAnalysis, AnalysisError> {
    let video_info = source.fetch_video_info(video_ref).await?;
    if video_info.comment_count == 0 {
        return Err(AnalysisError::EmptyInput);
    }

    let comments = source.fetch_comments(video_ref, max_comments).await?;
    if comments.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    tracing::info!(
        video = video_ref,
        fetched = comments.len(),
        "fetched comments"
    );

    let result = analyzer.analyze(&comments, &video_info.title).await;
    Ok(VideoAnalysis { video_info, result })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use ytinsight_core::{CommentBatch, SourceError, VideoInfo};

    use super::*;
    use crate::error::LlmError;
    use crate::types::{IdeaKind, Level};

    /// LLM double that replays a fixed reply and records every prompt it sees.
    struct ScriptedLlm {
        reply: Result<String, fn() -> LlmError>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: fn() -> LlmError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmCompletion for ScriptedLlm {
        async fn complete(
            &self,
            _system: &str,
            user: &str,
            sampling: &SamplingConfig,
        ) -> Result<String, LlmError> {
            assert!(sampling.temperature < 0.5, "sampling should stay low");
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(user.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    struct FixedSource {
        info: VideoInfo,
        comments: CommentBatch,
    }

    #[async_trait]
    impl CommentSource for FixedSource {
        async fn fetch_video_info(&self, _video_ref: &str) -> Result<VideoInfo, SourceError> {
            Ok(self.info.clone())
        }

        async fn fetch_comments(
            &self,
            _video_ref: &str,
            max_comments: usize,
        ) -> Result<CommentBatch, SourceError> {
            Ok(self.comments.iter().take(max_comments).cloned().collect())
        }
    }

    struct DisabledSource;

    #[async_trait]
    impl CommentSource for DisabledSource {
        async fn fetch_video_info(&self, _video_ref: &str) -> Result<VideoInfo, SourceError> {
            Ok(video_info(12))
        }

        async fn fetch_comments(
            &self,
            _video_ref: &str,
            _max_comments: usize,
        ) -> Result<CommentBatch, SourceError> {
            Err(SourceError::CommentsDisabled)
        }
    }

    fn video_info(comment_count: u64) -> VideoInfo {
        VideoInfo {
            title: "Bread 101".to_string(),
            channel_title: "Bakery".to_string(),
            view_count: 1_000,
            like_count: 50,
            comment_count,
            published_at: None,
        }
    }

    fn comments(n: usize) -> CommentBatch {
        (0..n)
            .map(|i| Comment {
                like_count: 2,
                reply_count: 1,
                ..Comment::from_text(format!("comment number {i}"))
            })
            .collect()
    }

    const GOOD_REPLY: &str = r#"Sure! Here you go: {
        "frequently_asked_questions": [{"question": "Which flour?", "frequency": 3, "example_comments": []}],
        "pain_points": [{"issue": "Sticky dough", "severity": "high", "example_comments": []}],
        "content_requests": [],
        "emotional_sentiment": {
            "frustrated": {"percentage": 10, "examples": []},
            "excited": {"percentage": 50, "examples": []},
            "confused": {"percentage": 10, "examples": []},
            "satisfied": {"percentage": 30, "examples": []}
        },
        "learning_topics": [],
        "misconceptions": []
    } Hope this helps!"#;

    #[tokio::test]
    async fn empty_batch_short_circuits_without_llm_call() {
        let llm = ScriptedLlm::replying(GOOD_REPLY);
        let analyzer = CommentAnalyzer::new(llm.clone());

        let result = analyzer.analyze(&[], "Bread 101").await;

        assert_eq!(llm.call_count(), 0);
        assert_eq!(result.comment_count, 0);
        assert!(result.analysis.is_empty());
        assert!(result.video_ideas.is_empty());
        assert_eq!(result.engagement_metrics, EngagementMetrics::zero());
    }

    #[tokio::test]
    async fn parsed_reply_drives_ideas_and_metrics() {
        let llm = ScriptedLlm::replying(GOOD_REPLY);
        let analyzer = CommentAnalyzer::new(llm.clone());

        let result = analyzer.analyze(&comments(3), "Bread 101").await;

        assert_eq!(llm.call_count(), 1);
        assert_eq!(result.comment_count, 3);
        assert_eq!(result.analysis.pain_points[0].issue, "Sticky dough");
        let kinds: Vec<IdeaKind> = result.video_ideas.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IdeaKind::Faq, IdeaKind::Tutorial]);
        assert_eq!(result.engagement_metrics.total_likes_on_comments, 6);
        assert_eq!(result.engagement_metrics.total_replies, 3);
    }

    #[tokio::test]
    async fn malformed_reply_degrades_to_empty_record() {
        let llm = ScriptedLlm::replying("I'm sorry, I can't help with that.");
        let analyzer = CommentAnalyzer::new(llm);

        let result = analyzer.analyze(&comments(2), "Bread 101").await;

        assert!(result.analysis.is_empty());
        assert!(result.video_ideas.is_empty());
        assert_eq!(result.comment_count, 2);
        assert_eq!(result.engagement_metrics.total_likes_on_comments, 4);
    }

    #[tokio::test]
    async fn llm_failure_degrades_to_empty_record() {
        let llm = ScriptedLlm::failing(|| LlmError::QuotaExceeded("insufficient_quota".into()));
        let analyzer = CommentAnalyzer::new(llm.clone());

        let result = analyzer.analyze(&comments(5), "Bread 101").await;

        assert_eq!(llm.call_count(), 1);
        assert!(result.analysis.is_empty());
        assert_eq!(result.comment_count, 5);
        assert_eq!(result.engagement_metrics.engagement_quality, Level::Low);
    }

    #[tokio::test]
    async fn only_sampled_comments_reach_the_llm_but_all_are_counted() {
        let llm = ScriptedLlm::replying(GOOD_REPLY);
        let analyzer = CommentAnalyzer::new(llm.clone());

        let result = analyzer.analyze(&comments(80), "Bread 101").await;

        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("comment number 49\n"));
        assert!(!prompts[0].contains("comment number 50\n"));
        assert_eq!(result.comment_count, 80);
        assert_eq!(result.engagement_metrics.total_likes_on_comments, 160);
    }

    #[tokio::test]
    async fn analyze_video_returns_info_and_result() {
        let source = FixedSource {
            info: video_info(4),
            comments: comments(4),
        };
        let analyzer = CommentAnalyzer::new(ScriptedLlm::replying(GOOD_REPLY));

        let analysis = analyze_video(&source, &analyzer, "abcdefghijk", 500)
            .await
            .expect("analysis should succeed");

        assert_eq!(analysis.video_info.title, "Bread 101");
        assert_eq!(analysis.result.comment_count, 4);
        assert_eq!(
            analysis.result.video_ideas[0].title,
            "FAQ: Top Questions from 'Bread 101' Viewers"
        );
    }

    #[tokio::test]
    async fn analyze_video_respects_max_comments() {
        let source = FixedSource {
            info: video_info(10),
            comments: comments(10),
        };
        let analyzer = CommentAnalyzer::new(ScriptedLlm::replying(GOOD_REPLY));

        let analysis = analyze_video(&source, &analyzer, "abcdefghijk", 3)
            .await
            .expect("analysis should succeed");

        assert_eq!(analysis.result.comment_count, 3);
    }

    #[tokio::test]
    async fn analyze_video_rejects_zero_comment_video() {
        let source = FixedSource {
            info: video_info(0),
            comments: comments(2),
        };
        let llm = ScriptedLlm::replying(GOOD_REPLY);
        let analyzer = CommentAnalyzer::new(llm.clone());

        let err = analyze_video(&source, &analyzer, "abcdefghijk", 500)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyInput));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn analyze_video_rejects_empty_fetch() {
        let source = FixedSource {
            info: video_info(9),
            comments: Vec::new(),
        };
        let analyzer = CommentAnalyzer::new(ScriptedLlm::replying(GOOD_REPLY));

        let err = analyze_video(&source, &analyzer, "abcdefghijk", 500)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyInput));
    }

    #[tokio::test]
    async fn analyze_video_propagates_source_errors() {
        let analyzer = CommentAnalyzer::new(ScriptedLlm::replying(GOOD_REPLY));

        let err = analyze_video(&DisabledSource, &analyzer, "abcdefghijk", 500)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::Source(SourceError::CommentsDisabled)
        ));
    }
}
