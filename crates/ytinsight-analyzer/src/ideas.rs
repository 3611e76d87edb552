//! Fixed selection rules that turn an insight record into video ideas.

use crate::types::{IdeaKind, InsightRecord, Level, VideoIdea};

const FAQ_QUESTION_LIMIT: usize = 3;
const TUTORIAL_LIMIT: usize = 2;
const DEEP_DIVE_LIMIT: usize = 2;
const CLARIFICATION_LIMIT: usize = 1;

/// Derives video ideas from `record`.
///
/// Rules run in a fixed order and independently of each other:
///
/// 1. One FAQ idea when any frequently asked questions exist.
/// 2. A tutorial for each of the first two `high`/`medium` pain points.
/// 3. A deep dive for each of the first two content requests.
/// 4. A clarification for the first misconception.
///
/// Returns at most six ideas; an empty record yields none.
#[must_use]
pub fn generate_video_ideas(record: &InsightRecord, video_title: &str) -> Vec<VideoIdea> {
    let mut ideas = Vec::new();
    ideas.extend(faq_idea(record, video_title));
    ideas.extend(tutorial_ideas(record));
    ideas.extend(deep_dive_ideas(record));
    ideas.extend(clarification_ideas(record));
    ideas
}

fn faq_idea(record: &InsightRecord, video_title: &str) -> Option<VideoIdea> {
    let questions = &record.frequently_asked_questions;
    if questions.is_empty() {
        return None;
    }

    let top_questions = questions
        .iter()
        .take(FAQ_QUESTION_LIMIT)
        .map(|q| q.question.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Some(VideoIdea {
        title: format!("FAQ: Top Questions from '{video_title}' Viewers"),
        description: format!("Answering the most common questions: {top_questions}"),
        kind: IdeaKind::Faq,
        estimated_interest: Level::High,
        reasoning: format!("Based on {} frequently asked questions", questions.len()),
    })
}

// Low-severity pain points are filtered out before the limit is applied.
fn tutorial_ideas(record: &InsightRecord) -> impl Iterator<Item = VideoIdea> + '_ {
    record
        .pain_points
        .iter()
        .filter(|p| matches!(p.severity, Level::High | Level::Medium))
        .take(TUTORIAL_LIMIT)
        .map(|p| VideoIdea {
            title: format!("How to Fix: {}", p.issue),
            description: format!(
                "Step-by-step solution for viewers struggling with {}",
                p.issue
            ),
            kind: IdeaKind::Tutorial,
            estimated_interest: p.severity,
            reasoning: format!("Addresses {}-priority pain point from comments", p.severity),
        })
}

fn deep_dive_ideas(record: &InsightRecord) -> impl Iterator<Item = VideoIdea> + '_ {
    record
        .content_requests
        .iter()
        .take(DEEP_DIVE_LIMIT)
        .map(|r| VideoIdea {
            title: format!("Deep Dive: {}", r.request),
            description: format!(
                "Detailed exploration of {} as requested by viewers",
                r.request
            ),
            kind: IdeaKind::DeepDive,
            estimated_interest: r.interest_level,
            reasoning: format!(
                "Direct audience request with {} interest level",
                r.interest_level
            ),
        })
}

fn clarification_ideas(record: &InsightRecord) -> impl Iterator<Item = VideoIdea> + '_ {
    record
        .misconceptions
        .iter()
        .take(CLARIFICATION_LIMIT)
        .map(|m| VideoIdea {
            title: format!("Clearing Up Confusion: {}", m.misconception),
            description: format!(
                "Addressing common misconceptions: {}",
                m.clarification_needed
            ),
            kind: IdeaKind::Clarification,
            estimated_interest: Level::Medium,
            reasoning: "Helps prevent audience confusion and builds authority".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentRequest, FrequentQuestion, Misconception, PainPoint};

    fn question(text: &str) -> FrequentQuestion {
        FrequentQuestion {
            question: text.to_string(),
            frequency: 1,
            example_comments: Vec::new(),
        }
    }

    fn pain(issue: &str, severity: Level) -> PainPoint {
        PainPoint {
            issue: issue.to_string(),
            severity,
            example_comments: Vec::new(),
        }
    }

    fn request(text: &str, interest_level: Level) -> ContentRequest {
        ContentRequest {
            request: text.to_string(),
            interest_level,
            example_comments: Vec::new(),
        }
    }

    fn misconception(text: &str) -> Misconception {
        Misconception {
            misconception: text.to_string(),
            clarification_needed: format!("why {text} is wrong"),
            example_comments: Vec::new(),
        }
    }

    fn full_record() -> InsightRecord {
        InsightRecord {
            frequently_asked_questions: vec![
                question("Q1"),
                question("Q2"),
                question("Q3"),
                question("Q4"),
            ],
            pain_points: vec![pain("P1", Level::High), pain("P2", Level::Medium)],
            content_requests: vec![
                request("R1", Level::Low),
                request("R2", Level::High),
                request("R3", Level::High),
            ],
            misconceptions: vec![misconception("M1"), misconception("M2")],
            ..InsightRecord::empty()
        }
    }

    #[test]
    fn empty_record_yields_no_ideas() {
        assert!(generate_video_ideas(&InsightRecord::empty(), "t").is_empty());
    }

    #[test]
    fn full_record_yields_six_ideas_in_rule_order() {
        let ideas = generate_video_ideas(&full_record(), "Bread 101");
        let kinds: Vec<IdeaKind> = ideas.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IdeaKind::Faq,
                IdeaKind::Tutorial,
                IdeaKind::Tutorial,
                IdeaKind::DeepDive,
                IdeaKind::DeepDive,
                IdeaKind::Clarification,
            ]
        );
    }

    #[test]
    fn faq_idea_lists_first_three_questions_and_total_count() {
        let ideas = generate_video_ideas(&full_record(), "Bread 101");
        let faq = &ideas[0];
        assert_eq!(faq.title, "FAQ: Top Questions from 'Bread 101' Viewers");
        assert_eq!(
            faq.description,
            "Answering the most common questions: Q1, Q2, Q3"
        );
        assert_eq!(faq.estimated_interest, Level::High);
        assert_eq!(faq.reasoning, "Based on 4 frequently asked questions");
    }

    #[test]
    fn tutorials_take_first_two_after_dropping_low_severity() {
        let record = InsightRecord {
            pain_points: vec![
                pain("p0", Level::Low),
                pain("p1", Level::High),
                pain("p2", Level::Medium),
                pain("p3", Level::High),
                pain("p4", Level::Low),
            ],
            ..InsightRecord::empty()
        };
        let ideas = generate_video_ideas(&record, "t");
        let titles: Vec<&str> = ideas.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["How to Fix: p1", "How to Fix: p2"]);
        assert_eq!(ideas[0].estimated_interest, Level::High);
        assert_eq!(ideas[1].estimated_interest, Level::Medium);
        assert_eq!(
            ideas[1].reasoning,
            "Addresses medium-priority pain point from comments"
        );
    }

    #[test]
    fn only_low_pain_points_yield_no_tutorials() {
        let record = InsightRecord {
            pain_points: vec![pain("a", Level::Low), pain("b", Level::Low)],
            ..InsightRecord::empty()
        };
        assert!(generate_video_ideas(&record, "t").is_empty());
    }

    #[test]
    fn deep_dives_keep_interest_level_without_filtering() {
        let ideas = generate_video_ideas(&full_record(), "t");
        let deep_dives: Vec<&VideoIdea> = ideas
            .iter()
            .filter(|i| i.kind == IdeaKind::DeepDive)
            .collect();
        assert_eq!(deep_dives.len(), 2);
        assert_eq!(deep_dives[0].title, "Deep Dive: R1");
        assert_eq!(deep_dives[0].estimated_interest, Level::Low);
        assert_eq!(deep_dives[1].estimated_interest, Level::High);
    }

    #[test]
    fn only_first_misconception_is_used_with_medium_interest() {
        let ideas = generate_video_ideas(&full_record(), "t");
        let clarification = ideas.last().expect("clarification idea");
        assert_eq!(clarification.title, "Clearing Up Confusion: M1");
        assert_eq!(
            clarification.description,
            "Addressing common misconceptions: why M1 is wrong"
        );
        assert_eq!(clarification.estimated_interest, Level::Medium);
    }

    #[test]
    fn rules_are_independent() {
        let record = InsightRecord {
            misconceptions: vec![misconception("only")],
            ..InsightRecord::empty()
        };
        let ideas = generate_video_ideas(&record, "t");
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].kind, IdeaKind::Clarification);
    }

    #[test]
    fn generation_is_idempotent() {
        let record = full_record();
        assert_eq!(
            generate_video_ideas(&record, "Bread 101"),
            generate_video_ideas(&record, "Bread 101")
        );
    }
}
