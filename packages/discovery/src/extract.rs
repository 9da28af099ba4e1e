//! JSON extraction from unstructured provider responses.
//!
//! The generation provider is not contractually bound to emit pure
//! JSON: responses may carry prose, markdown fences, or both. Every
//! pipeline stage parses through this single entry point so fallback
//! behavior is identical everywhere.
//!
//! Three tiers, tried in order:
//! 1. direct parse of the trimmed text;
//! 2. strip a single leading/trailing fenced-code-block marker;
//! 3. greedy outermost `{..}` / `[..]` substring match.
//!
//! There is deliberately no semantic repair (no bracket balancing);
//! genuinely malformed payloads fail fast with a parse error.

use serde_json::Value;

use crate::error::{DiscoveryError, Result};

/// Requested top-level shape of the extracted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }

    fn delimiters(self) -> (char, char) {
        match self {
            Self::Object => ('{', '}'),
            Self::Array => ('[', ']'),
        }
    }
}

/// Extract a JSON value of the requested shape from a raw text blob.
pub fn extract_json(raw: &str, shape: JsonShape) -> Result<Value> {
    let trimmed = raw.trim();

    if let Some(value) = parse_as(trimmed, shape) {
        return Ok(value);
    }

    let unfenced = strip_fence(trimmed);
    if let Some(value) = parse_as(unfenced, shape) {
        return Ok(value);
    }

    if let Some(span) = outermost_span(trimmed, shape) {
        if let Some(value) = parse_as(span, shape) {
            return Ok(value);
        }
    }

    let shape_name = match shape {
        JsonShape::Object => "object",
        JsonShape::Array => "array",
    };
    Err(DiscoveryError::parse(format!(
        "no parseable JSON {} in response ({} chars)",
        shape_name,
        raw.len()
    )))
}

fn parse_as(text: &str, shape: JsonShape) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|v| shape.matches(v))
}

/// Strip one leading and one trailing markdown fence marker.
fn strip_fence(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Greedy outermost match: first opening delimiter through the last
/// closing delimiter. Mirrors the permissive regex the upstream
/// service shipped with, without attempting to balance brackets.
fn outermost_span(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        let value = extract_json(r#"{"name": "Zuni Cafe"}"#, JsonShape::Object).unwrap();
        assert_eq!(value["name"], "Zuni Cafe");
    }

    #[test]
    fn test_fenced_object() {
        let raw = "```json\n{\"name\": \"Zuni Cafe\"}\n```";
        let value = extract_json(raw, JsonShape::Object).unwrap();
        assert_eq!(value["name"], "Zuni Cafe");
    }

    #[test]
    fn test_object_wrapped_in_prose() {
        let raw = "Here are your results:\n{\"restaurants\": []}\nHope that helps!";
        let value = extract_json(raw, JsonShape::Object).unwrap();
        assert!(value["restaurants"].is_array());
    }

    #[test]
    fn test_array_wrapped_in_prose() {
        let raw = "Sure! [\n {\"name\": \"A\"}, {\"name\": \"B\"}\n] done.";
        let value = extract_json(raw, JsonShape::Array).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_no_json_fails() {
        let result = extract_json("I could not find any restaurants, sorry.", JsonShape::Object);
        assert!(matches!(result, Err(DiscoveryError::Parse { .. })));
    }

    #[test]
    fn test_shape_mismatch_fails() {
        let result = extract_json(r#"{"name": "not an array"}"#, JsonShape::Array);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_is_not_repaired() {
        // Truncated payload: outermost span exists but does not parse.
        let raw = r#"{"restaurants": [{"name": "Cut off here"}"#;
        assert!(extract_json(raw, JsonShape::Object).is_err());
    }

    #[test]
    fn test_fenced_array_without_language_tag() {
        let raw = "```\n[1, 2, 3]\n```";
        let value = extract_json(raw, JsonShape::Array).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }
}
