//! Extraction of an [`InsightRecord`] from free-form model output.

use crate::error::ParseError;
use crate::types::InsightRecord;

/// Parses the JSON object embedded in a model reply.
///
/// The payload is the span from the first `{` to the last `}` inclusive, so
/// conversational text around the object is ignored. The result must carry
/// all six top-level fields with valid enum values and percentages within
/// `0..=100`; there is no partial result.
///
/// # Errors
///
/// - [`ParseError::NoJsonObject`] if the reply has no `{ ... }` span.
/// - [`ParseError::Json`] if the span is not valid JSON or does not match
///   the insight schema.
/// - [`ParseError::OutOfRange`] if a sentiment percentage is outside `0..=100`.
pub fn parse_insight_record(text: &str) -> Result<InsightRecord, ParseError> {
    let payload = extract_json_object(text).ok_or(ParseError::NoJsonObject)?;
    let record: InsightRecord = serde_json::from_str(payload)?;
    validate(&record)?;
    Ok(record)
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn validate(record: &InsightRecord) -> Result<(), ParseError> {
    for (field, share) in record.emotional_sentiment.entries() {
        let value = share.percentage;
        if !(0.0..=100.0).contains(&value) {
            return Err(ParseError::OutOfRange { field, value });
        }
    }
    Ok(())
}
