//! Response Normalizer: the only gate between provider text and a typed `GeneratedCv`.
//!
//! Steps: strip fence artifacts → parse JSON → check against `schema::GENERATED_CV`
//! → deserialize. No repair, no coercion, no local recomputation.

use serde_json::Value;
use thiserror::Error;

use crate::generation::models::GeneratedCv;
use crate::generation::schema::{self, GENERATED_CV};

/// Max characters of offending provider text kept for diagnostics.
const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum MalformedResponseError {
    #[error("The AI response could not be read as JSON: {reason}")]
    ParseFailure { reason: String, snippet: String },

    #[error("The AI response has an invalid `{path}`: {reason}")]
    SchemaViolation { path: String, reason: String },
}

pub fn normalize(raw: &str) -> Result<GeneratedCv, MalformedResponseError> {
    let payload = extract_json(raw);

    let value: Value =
        serde_json::from_str(payload).map_err(|e| MalformedResponseError::ParseFailure {
            reason: e.to_string(),
            snippet: truncate(raw),
        })?;

    validate_document(value)
}

/// Schema check plus typed projection for an already-parsed value.
pub fn validate_document(value: Value) -> Result<GeneratedCv, MalformedResponseError> {
    schema::check(&value, &GENERATED_CV)?;

    // The schema accepted the value, so this only fails if the table and the
    // struct drift apart.
    serde_json::from_value(value).map_err(|e| MalformedResponseError::SchemaViolation {
        path: "$".to_string(),
        reason: e.to_string(),
    })
}

/// Strips code fences (with or without a language tag) and any chatter around
/// the JSON body. The payload itself is returned untouched.
fn extract_json(raw: &str) -> &str {
    let text = strip_json_fences(raw);

    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }

    // "Sure! Here is your CV: {...}": take the outermost object.
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Returns the contents of the fenced block wrapping the payload, or the
/// trimmed text when there is none. Only a fence opened before the first `{`
/// counts, so backticks inside JSON strings are left alone.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let first_brace = text.find('{').unwrap_or(text.len());
    let open = match text.find("```") {
        Some(open) if open < first_brace => open,
        _ => return text,
    };

    let after_fence = &text[open + 3..];
    // Drop the language tag line, e.g. "json\n".
    let body = match after_fence.find('\n') {
        Some(newline) if is_language_tag(&after_fence[..newline]) => &after_fence[newline + 1..],
        _ => after_fence,
    };
    // A bare tag glued to the body: "```json{...}".
    let body = body.strip_prefix("json").unwrap_or(body);

    match body.rfind("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn truncate(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
