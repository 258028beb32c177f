//! Structured Response Extractor
//!
//! Given raw model text, locate a JSON object substring if the reply is
//! prose-wrapped, attempt a strict parse, and on any failure synthesize a
//! record from the raw text. The contract "always returns both fields
//! populated" holds unconditionally.

use serde_json::Value;

use crate::contracts::{RecordOrigin, StructuredRecord};

use super::sanitize::sanitize;

/// Rationale text used when a record is synthesized from an unparseable
/// reply.
pub const FALLBACK_THOUGHTS: &str = "Processed the input and structured the response";

/// Extract a [`StructuredRecord`] from a raw model reply. Total function.
///
/// 1. Trim surrounding whitespace.
/// 2. Take the greedy `{...}` span, from the first `{` to the last `}`, as
///    the candidate payload; without such a span, the full trimmed text is
///    the candidate. This handles replies that wrap JSON in explanatory
///    prose.
/// 3. Sanitize the candidate and attempt a strict JSON parse.
/// 4. The parsed value must be an object; arrays and scalars take the
///    fallback path even though they are valid JSON.
/// 5. On success, read `thoughts` and `response` (absent keys default to
///    empty text) and re-sanitize each value, guarding against partially
///    escaped nested content.
/// 6. On failure, synthesize a record carrying the sanitized candidate as
///    the response.
pub fn extract(raw: &str) -> StructuredRecord {
    let trimmed = raw.trim();

    let candidate = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    };

    let cleaned = sanitize(candidate);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(fields)) => StructuredRecord {
            thoughts: sanitize(&field_text(fields.get("thoughts"))),
            response: sanitize(&field_text(fields.get("response"))),
            origin: RecordOrigin::Parsed,
        },
        _ => StructuredRecord {
            thoughts: FALLBACK_THOUGHTS.to_string(),
            response: cleaned,
            origin: RecordOrigin::Synthesized,
        },
    }
}

/// Render a field value as text: strings as-is, other JSON values as their
/// compact JSON form, absent keys as empty text.
fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
