//! Rendering of the comment sample into a single analysis request.

use ytinsight_core::Comment;

/// Maximum number of comments embedded in one prompt.
pub const SAMPLE_SIZE: usize = 50;

/// Low temperature keeps the model on the requested schema.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

pub const SYSTEM_INSTRUCTION: &str = "You are an expert YouTube content strategist who analyzes \
comments to help creators understand their audience and generate content ideas.";

/// Target shape of the reply. Keys and enum values must stay in sync with
/// [`crate::types::InsightRecord`].
const RESPONSE_SCHEMA: &str = r#"{
    "frequently_asked_questions": [
        {"question": "What question?", "frequency": 5, "example_comments": ["comment1", "comment2"]}
    ],
    "pain_points": [
        {"issue": "What issue?", "severity": "high|medium|low", "example_comments": ["comment1", "comment2"]}
    ],
    "content_requests": [
        {"request": "What do they want?", "interest_level": "high|medium|low", "example_comments": ["comment1", "comment2"]}
    ],
    "emotional_sentiment": {
        "frustrated": {"percentage": 20, "examples": ["comment1"]},
        "excited": {"percentage": 40, "examples": ["comment1"]},
        "confused": {"percentage": 15, "examples": ["comment1"]},
        "satisfied": {"percentage": 25, "examples": ["comment1"]}
    },
    "learning_topics": [
        {"topic": "What topic?", "demand": "high|medium|low", "example_comments": ["comment1", "comment2"]}
    ],
    "misconceptions": [
        {"misconception": "What misconception?", "clarification_needed": "What needs clarifying?", "example_comments": ["comment1"]}
    ]
}"#;

/// System and user messages for one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt {
    pub system: String,
    pub user: String,
}

/// Returns the prefix of `comments` that is sent to the model.
#[must_use]
pub fn sample_comments(comments: &[Comment]) -> &[Comment] {
    &comments[..comments.len().min(SAMPLE_SIZE)]
}

/// Builds the analysis request for a video.
///
/// Only the first [`SAMPLE_SIZE`] comments are embedded, newline-joined and
/// otherwise verbatim. The output depends on nothing but the inputs.
#[must_use]
pub fn build_prompt(comments: &[Comment], video_title: &str) -> AnalysisPrompt {
    let comments_text = sample_comments(comments)
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "Analyze these YouTube comments for the video titled \"{video_title}\".\n\
         \n\
         Comments:\n\
         {comments_text}\n\
         \n\
         Please provide a JSON response with the following structure:\n\
         {RESPONSE_SCHEMA}\n\
         \n\
         Use exactly these keys. Severity, interest_level and demand must each be one of \
         \"high\", \"medium\" or \"low\". Percentages are numbers from 0 to 100.\n\
         Keep responses concise and focus on actionable insights for content creators."
    );

    AnalysisPrompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user,
    }
}
