use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use ytinsight_core::VideoInfo;

/// Three-step rating used for severity, interest, demand and engagement quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Medium => "medium",
            Level::Low => "low",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Models are inconsistent about casing, so "High" and " medium " are accepted.
impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Level::High),
            "medium" => Ok(Level::Medium),
            "low" => Ok(Level::Low),
            other => Err(de::Error::unknown_variant(
                other,
                &["high", "medium", "low"],
            )),
        }
    }
}

/// A question viewers keep asking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentQuestion {
    pub question: String,
    pub frequency: u32,
    #[serde(default, alias = "exampleComments")]
    pub example_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainPoint {
    pub issue: String,
    pub severity: Level,
    #[serde(default, alias = "exampleComments")]
    pub example_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub request: String,
    #[serde(alias = "interestLevel")]
    pub interest_level: Level,
    #[serde(default, alias = "exampleComments")]
    pub example_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningTopic {
    pub topic: String,
    pub demand: Level,
    #[serde(default, alias = "exampleComments")]
    pub example_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misconception {
    pub misconception: String,
    #[serde(alias = "clarificationNeeded")]
    pub clarification_needed: String,
    #[serde(default, alias = "exampleComments")]
    pub example_comments: Vec<String>,
}

/// Share of comments expressing one emotion. `percentage` is within `0..=100`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentShare {
    pub percentage: f64,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionalSentiment {
    pub frustrated: SentimentShare,
    pub excited: SentimentShare,
    pub confused: SentimentShare,
    pub satisfied: SentimentShare,
}

impl EmotionalSentiment {
    /// Emotions paired with their wire names, in schema order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &SentimentShare); 4] {
        [
            ("frustrated", &self.frustrated),
            ("excited", &self.excited),
            ("confused", &self.confused),
            ("satisfied", &self.satisfied),
        ]
    }
}

/// Structured summary of audience themes parsed from a model reply.
///
/// All six fields are required when deserializing; [`InsightRecord::empty`]
/// (equal to `Default`) is the fallback for every failure path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    #[serde(alias = "frequentlyAskedQuestions")]
    pub frequently_asked_questions: Vec<FrequentQuestion>,
    #[serde(alias = "painPoints")]
    pub pain_points: Vec<PainPoint>,
    #[serde(alias = "contentRequests")]
    pub content_requests: Vec<ContentRequest>,
    #[serde(alias = "emotionalSentiment")]
    pub emotional_sentiment: EmotionalSentiment,
    #[serde(alias = "learningTopics")]
    pub learning_topics: Vec<LearningTopic>,
    pub misconceptions: Vec<Misconception>,
}

impl InsightRecord {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when this record equals the canonical empty record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdeaKind {
    #[serde(rename = "FAQ")]
    Faq,
    Tutorial,
    #[serde(rename = "Deep Dive", alias = "DeepDive")]
    DeepDive,
    Clarification,
}

/// A content suggestion derived from an insight record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoIdea {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: IdeaKind,
    pub estimated_interest: Level,
    pub reasoning: String,
}

/// Aggregate engagement statistics computed from the comments themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub total_likes_on_comments: u64,
    pub total_replies: u64,
    /// Mean comment length in characters, rounded to one decimal place.
    pub average_comment_length: f64,
    pub engagement_quality: Level,
}

impl EngagementMetrics {
    /// Metrics for an empty comment batch.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            total_likes_on_comments: 0,
            total_replies: 0,
            average_comment_length: 0.0,
            engagement_quality: Level::Low,
        }
    }
}

/// Output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Number of comments in the full batch, not just the sampled prefix.
    pub comment_count: usize,
    pub analysis: InsightRecord,
    pub video_ideas: Vec<VideoIdea>,
    pub engagement_metrics: EngagementMetrics,
}

/// Analysis result together with the metadata of the analyzed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub video_info: VideoInfo,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Sampling parameters for the completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: crate::prompt::DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}
