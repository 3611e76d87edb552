//! Comment-to-insight pipeline for ytinsight.
//!
//! Samples a video's comments into a single LLM analysis prompt, parses the
//! model's semi-structured reply into an [`InsightRecord`], derives ranked
//! [`VideoIdea`]s from it, and scores comment engagement independently of the
//! model. Any LLM or parse failure degrades to the empty insight record.

pub mod engagement;
pub mod error;
pub mod ideas;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod types;

mod retry;

pub use engagement::score_engagement;
pub use error::{AnalysisError, LlmError, ParseError};
pub use ideas::generate_video_ideas;
pub use llm::{LlmCompletion, OpenAiClient};
pub use parser::parse_insight_record;
pub use pipeline::{analyze_video, CommentAnalyzer};
pub use prompt::{build_prompt, AnalysisPrompt};
pub use types::{
    AnalysisResult, EngagementMetrics, IdeaKind, InsightRecord, Level, SamplingConfig,
    VideoAnalysis, VideoIdea,
};
