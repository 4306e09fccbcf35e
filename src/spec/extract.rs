//! Tolerant JSON extraction from model output
//!
//! Two strictness levels, used by different halves of the system:
//!
//! - [`extract_json_block`] scans a conversational reply for the first
//!   fenced ```json block and fails soft - absent or malformed JSON is
//!   simply "no spec yet", never an error. A bad model turn must not take
//!   down the conversation.
//! - [`parse_json_loose`] handles a spec delivered as a file. It tolerates
//!   a surrounding code fence and extra prose, but fails hard on invalid
//!   JSON: file input is assumed pre-validated, so a parse failure there is
//!   a caller bug worth surfacing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Matches the first fenced ```json block containing a JSON object.
static JSON_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("fence regex is valid"));

/// Errors from strict (file-mode) extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid JSON: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("top-level JSON must be an object")]
    NotAnObject,
}

/// Pull a JSON object out of a conversational reply.
///
/// Only the first ```json fence is considered. Returns `None` when no fence
/// matches or the fenced content is not a parseable JSON object.
pub fn extract_json_block(text: &str) -> Option<Map<String, Value>> {
    let captures = JSON_BLOCK_RE.captures(text)?;
    let raw = captures.get(1)?.as_str();

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "extract_json_block: fenced block is not valid JSON");
            None
        }
    }
}

/// Parse a JSON object from file content that may be wrapped in a code
/// fence or surrounded by prose.
///
/// Strips one leading/trailing fence (with optional `json` tag), narrows to
/// the substring between the first `{` and the last `}`, then parses.
pub fn parse_json_loose(raw: &str) -> Result<Map<String, Value>, ExtractError> {
    let mut text = raw.trim();

    // Strip a surrounding markdown fence if present
    let stripped;
    if text.starts_with("```") {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() >= 3 && lines[0].starts_with("```") && lines[lines.len() - 1].trim() == "```" {
            stripped = lines[1..lines.len() - 1].join("\n");
            text = stripped.trim();
            if let Some(tag) = text.get(..4)
                && tag.eq_ignore_ascii_case("json")
            {
                text = text[4..].trim();
            }
        }
    }

    // Narrow to the JSON object if extra prose surrounds it
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && end > start
    {
        text = &text[start..=end];
    }

    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_fence() {
        let text = "Here is the spec:\n```json\n{\"project_name\": \"Acme\"}\n```\nDone.";
        let map = extract_json_block(text).unwrap();
        assert_eq!(map["project_name"], "Acme");
    }

    #[test]
    fn test_extract_no_fence_returns_none() {
        assert!(extract_json_block("Could you tell me more about the users?").is_none());
    }

    #[test]
    fn test_extract_untagged_fence_returns_none() {
        // Only ```json-tagged fences are recognized in conversational mode
        let text = "```\n{\"project_name\": \"Acme\"}\n```";
        assert!(extract_json_block(text).is_none());
    }

    #[test]
    fn test_extract_malformed_json_fails_soft() {
        let text = "```json\n{\"project_name\": \"Acme\",}\n```";
        assert!(extract_json_block(text).is_none());
    }

    #[test]
    fn test_extract_first_of_multiple_fences() {
        let text = "```json\n{\"a\": 1}\n```\nand also\n```json\n{\"b\": 2}\n```";
        let map = extract_json_block(text).unwrap();
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_extract_multiline_object() {
        let text = "```json\n{\n  \"goals\": [\n    \"reduce churn\"\n  ]\n}\n```";
        let map = extract_json_block(text).unwrap();
        assert_eq!(map["goals"][0], "reduce churn");
    }

    #[test]
    fn test_loose_bare_object() {
        let map = parse_json_loose("{\"project_name\": \"Acme\"}").unwrap();
        assert_eq!(map["project_name"], "Acme");
    }

    #[test]
    fn test_loose_generic_fence() {
        let map = parse_json_loose("```\n{\"project_name\": \"Acme\"}\n```").unwrap();
        assert_eq!(map["project_name"], "Acme");
    }

    #[test]
    fn test_loose_json_tagged_fence() {
        let map = parse_json_loose("```json\n{\"project_name\": \"Acme\"}\n```").unwrap();
        assert_eq!(map["project_name"], "Acme");
    }

    #[test]
    fn test_loose_surrounding_prose() {
        let map = parse_json_loose("Sure! Here you go: {\"a\": 1} Hope that helps.").unwrap();
        assert_eq!(map["a"], 1);
    }

    #[test]
    fn test_loose_invalid_json_fails_hard() {
        let result = parse_json_loose("not json");
        assert!(matches!(result, Err(ExtractError::Invalid(_))));
    }

    #[test]
    fn test_loose_top_level_array_rejected() {
        let result = parse_json_loose("[1, 2, 3]");
        assert!(matches!(result, Err(ExtractError::Invalid(_) | ExtractError::NotAnObject)));
    }
}
