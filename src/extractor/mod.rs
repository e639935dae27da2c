//! Extraction of the model's answer from a chat-completion response body.
//!
//! The extractor anchors only on the first `content` field, so it keeps working
//! when the wrapper fields around it change between providers. Bodies that parse
//! as JSON are searched in document order. Bodies that do not parse (truncated
//! or otherwise malformed) fall back to a scan for the literal `"content":"`
//! marker, honoring backslash escapes when looking for the closing quote.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const CONTENT_MARKER: &str = "\"content\":\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("content key not found")]
    ContentKeyNotFound,
    #[error("no closing quote")]
    NoClosingQuote,
}

/// Return the first string-valued `content` field of `raw_body`, unescaped
pub fn extract_content(raw_body: &str) -> Result<String, ExtractionError> {
    match serde_json::from_str::<Value>(raw_body) {
        Ok(value) => first_content_field(&value)
            .map(str::to_owned)
            .ok_or(ExtractionError::ContentKeyNotFound),
        Err(e) => {
            debug!(error = %e, "response body is not valid JSON, scanning for content marker");
            scan_content_field(raw_body)
        }
    }
}

fn first_content_field(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, field)| match field {
            Value::String(text) if key == "content" => Some(text.as_str()),
            other => first_content_field(other),
        }),
        Value::Array(items) => items.iter().find_map(first_content_field),
        _ => None,
    }
}

fn scan_content_field(raw_body: &str) -> Result<String, ExtractionError> {
    let start = raw_body.find(CONTENT_MARKER).ok_or(ExtractionError::ContentKeyNotFound)?
        + CONTENT_MARKER.len();
    let literal = &raw_body[start..];
    let end = closing_quote(literal).ok_or(ExtractionError::NoClosingQuote)?;
    Ok(decode_literal(&literal[..end]))
}

/// Byte offset of the first quote not consumed by a backslash escape.
/// Quote and backslash are ASCII, so byte scanning is safe on UTF-8 input.
fn closing_quote(literal: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, byte) in literal.bytes().enumerate() {
        match byte {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'"' => return Some(i),
            _ => {}
        }
    }
    None
}

fn decode_literal(body: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", body))
        .unwrap_or_else(|_| unescape_minimal(body))
}

// Raw control characters or bad escapes make the literal invalid JSON; undo
// only the escapes that matter for display.
fn unescape_minimal(body: &str) -> String {
    body.replace("\\\\", "\\").replace("\\\"", "\"").replace("\\n", "\n")
}
