//! Completion detection for elicitation conversations

use serde_json::{Map, Value};

/// Phrase the model uses to signal it has everything it needs when it does
/// not emit a spec. Matched case-insensitively. The same constant is
/// injected into the agent instructions so prompt and detector cannot drift.
pub const COMPLETION_MARKER: &str = "requirements are now sufficiently clear";

/// Decide whether a conversation turn represents a finished specification.
///
/// In priority order: an extracted spec means done; otherwise the completion
/// marker in the reply text means done; otherwise the conversation continues.
pub fn infer_done(reply: &str, spec: Option<&Map<String, Value>>) -> bool {
    if spec.is_some() {
        return true;
    }
    reply.to_lowercase().contains(COMPLETION_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::extract_json_block;

    #[test]
    fn test_done_when_spec_extracted() {
        let reply = "Still thinking...\n```json\n{\"project_name\": \"Acme\"}\n```";
        let spec = extract_json_block(reply);
        assert!(infer_done(reply, spec.as_ref()));
    }

    #[test]
    fn test_done_on_marker_phrase() {
        let reply = "Thanks, requirements are now sufficiently clear for you.";
        assert!(infer_done(reply, None));
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let reply = "REQUIREMENTS ARE NOW SUFFICIENTLY CLEAR.";
        assert!(infer_done(reply, None));
    }

    #[test]
    fn test_not_done_on_clarifying_question() {
        let reply = "Who are the target users, and what is the main constraint?";
        assert!(!infer_done(reply, None));
    }
}
