//! Embedded agent instructions
//!
//! Instruction templates are compiled into the binary and rendered with
//! Handlebars at agent construction. The canonical schema skeleton and the
//! completion phrase are injected from code, so the prompt can never drift
//! from what the extractor and completion detector actually look for.

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;

use crate::spec::{COMPLETION_MARKER, RequirementsSpec};

/// System prompt template for the requirements-gathering agent
const REQUIREMENTS_SYSTEM: &str = r#"# ROLE
You are a Technical Product Manager Assistant. Your goal is to help a PM
refine a raw product idea into a structured requirements specification.

# OPERATING PHASES
1. **Discovery**: when the user provides an idea, identify 3-4 ambiguity
   gaps (target audience, core features, technical constraints).
2. **Refinement**: ask exactly 2 targeted questions at a time, and
   acknowledge the user's previous answers.
3. **Finalization**: when the user says "I'm done" or "generate
   requirements", or once you have clear answers for users, features and
   constraints, produce the final output.

# FINAL OUTPUT FORMAT
Emit the finished specification as a single fenced JSON block, exactly this
shape, with your content filled in:

```json
{{{schema_json}}}
```

If you have everything you need but the user has not asked for the final
output yet, say so with the sentence "The {{completion_marker}}." and wait.

# CONSTRAINTS
- Do not invent features the user did not imply.
- If an idea is too vague (e.g. "I want a blue app"), explain why you need
  more detail.
- Keep every list entry a short plain-text string.
"#;

#[derive(Debug, Serialize)]
struct InstructionContext {
    schema_json: String,
    completion_marker: &'static str,
}

/// Render the requirements-gathering system prompt.
pub fn requirements_instructions() -> Result<String> {
    let schema_json = serde_json::to_string_pretty(&RequirementsSpec::default())
        .map_err(|e| eyre!("failed to serialize schema skeleton: {e}"))?;

    let context = InstructionContext {
        schema_json,
        completion_marker: COMPLETION_MARKER,
    };

    Handlebars::new()
        .render_template(REQUIREMENTS_SYSTEM, &context)
        .map_err(|e| eyre!("failed to render requirements instructions: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_render() {
        let rendered = requirements_instructions().unwrap();
        assert!(rendered.contains("Technical Product Manager"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_schema_skeleton_injected_unescaped() {
        let rendered = requirements_instructions().unwrap();
        assert!(rendered.contains("\"project_name\""));
        assert!(rendered.contains("\"non_functional_requirements\""));
        // Triple-stache must keep the JSON quoting intact
        assert!(!rendered.contains("&quot;"));
    }

    #[test]
    fn test_completion_marker_matches_detector() {
        let rendered = requirements_instructions().unwrap();
        assert!(rendered.contains(COMPLETION_MARKER));
        assert!(crate::spec::infer_done(&format!("The {COMPLETION_MARKER}."), None));
    }
}
