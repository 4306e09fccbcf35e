//! Markdown document rendering
//!
//! Three generators, one per artefact. Each builds the document as a list
//! of lines and joins at the end, so section order and spacing are explicit
//! and the output is deterministic down to the byte.

use crate::spec::RequirementsSpec;

/// Fallback shown for empty scalar sections.
const NA: &str = "N/A";

/// Benefit clause used when the spec supplies no goals.
const DEFAULT_BENEFIT: &str = "achieve the intended project outcome";

/// Render the requirements summary document.
pub fn requirements_summary(spec: &RequirementsSpec) -> String {
    let nfr = &spec.non_functional_requirements;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Requirements Summary: {}", spec.project_name));
    lines.push(String::new());
    lines.push("## Problem Statement".to_string());
    lines.push(or_na(&spec.problem_statement));
    lines.push(String::new());

    lines.push("## Target Users".to_string());
    lines.extend(bullet_list(&spec.target_users));
    lines.push(String::new());

    lines.push("## Goals".to_string());
    lines.extend(bullet_list(&spec.goals));
    lines.push(String::new());

    lines.push("## Non-Goals".to_string());
    lines.extend(bullet_list(&spec.non_goals));
    lines.push(String::new());

    lines.push("## Functional Requirements".to_string());
    if spec.functional_requirements.is_empty() {
        lines.push(format!("1. {NA}"));
    } else {
        for (i, fr) in spec.functional_requirements.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, fr));
        }
    }
    lines.push(String::new());

    lines.push("## Non-Functional Requirements".to_string());
    lines.push(format!("- Performance: {}", or_na(&nfr.performance)));
    lines.push(format!("- Security: {}", or_na(&nfr.security)));
    lines.push(format!("- Scalability: {}", or_na(&nfr.scalability)));
    lines.push(format!("- Availability: {}", or_na(&nfr.availability)));
    lines.push(String::new());

    lines.push("## Core Entities".to_string());
    lines.extend(bullet_list(&spec.core_entities));
    lines.push(String::new());

    lines.push("## Open Questions".to_string());
    lines.extend(bullet_list(&spec.open_questions));
    lines.push(String::new());

    lines.join("\n")
}

/// Render the user stories document.
///
/// One `US-NN` block per functional requirement, in input order. The role
/// is the first target user, the benefit the first goal; both have literal
/// fallbacks so the sentence is always well-formed.
pub fn user_stories(spec: &RequirementsSpec) -> String {
    let role = spec.target_users.first().map(String::as_str).unwrap_or("user");
    let benefit = spec.goals.first().map(String::as_str).unwrap_or(DEFAULT_BENEFIT);

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# User Stories: {}", spec.project_name));
    lines.push(String::new());
    lines.push("> Auto-generated from the Requirements Agent JSON output.".to_string());
    lines.push(String::new());

    if spec.functional_requirements.is_empty() {
        lines.push("- No functional requirements were provided.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    for (i, fr) in spec.functional_requirements.iter().enumerate() {
        lines.push(format!("## US-{:02}", i + 1));
        lines.push(story_sentence(role, fr, benefit));
        lines.push(String::new());
        lines.push("### Acceptance Criteria".to_string());
        lines.push("- The functionality is clearly defined and testable.".to_string());
        lines.push("- The feature aligns with project goals and scope.".to_string());
        if !spec.constraints.is_empty() {
            lines.push("- The implementation respects the documented constraints.".to_string());
        }
        lines.push("- The output can be reviewed and revised by the user/team.".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render the scope and constraints document.
pub fn scope_constraints(spec: &RequirementsSpec) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Scope & Constraints: {}", spec.project_name));
    lines.push(String::new());

    lines.push("## In Scope (Goals)".to_string());
    lines.extend(bullet_list(&spec.goals));
    lines.push(String::new());

    lines.push("## Out of Scope (Non-Goals)".to_string());
    lines.extend(bullet_list(&spec.non_goals));
    lines.push(String::new());

    lines.push("## Assumptions".to_string());
    lines.extend(bullet_list(&spec.assumptions));
    lines.push(String::new());

    lines.push("## Constraints".to_string());
    lines.extend(bullet_list(&spec.constraints));
    lines.push(String::new());

    lines.push("## Core Entities".to_string());
    lines.extend(bullet_list(&spec.core_entities));
    lines.push(String::new());

    lines.join("\n")
}

/// Shared bullet-list rule: empty sequence renders as a single N/A bullet.
fn bullet_list(items: &[String]) -> Vec<String> {
    if items.is_empty() {
        return vec![format!("- {NA}")];
    }
    items.iter().map(|item| format!("- {item}")).collect()
}

fn or_na(value: &str) -> String {
    if value.is_empty() { NA.to_string() } else { value.to_string() }
}

/// Build the "As a {role}, I want to ..." sentence for one requirement.
fn story_sentence(role: &str, requirement: &str, benefit: &str) -> String {
    let trimmed = requirement.trim();
    let action = if trimmed.is_empty() {
        "use the system".to_string()
    } else {
        lowercase_first(trimmed)
    };
    format!("As a {role}, I want to {action} so that I can {}.", benefit.to_lowercase())
}

/// Lower-case the first character only, leaving the rest untouched.
fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::spec::normalize;

    fn spec_from(value: serde_json::Value) -> RequirementsSpec {
        match value {
            serde_json::Value::Object(map) => normalize(&map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_summary_empty_spec_uses_na_fallbacks() {
        let doc = requirements_summary(&RequirementsSpec::default());

        assert!(doc.contains("## Problem Statement\nN/A\n"));
        assert!(doc.contains("## Target Users\n- N/A\n"));
        assert!(doc.contains("## Functional Requirements\n1. N/A\n"));
        assert!(doc.contains("- Performance: N/A"));
        assert!(doc.contains("- Availability: N/A"));
    }

    #[test]
    fn test_summary_numbering_follows_input_order() {
        let spec = spec_from(json!({
            "functional_requirements": ["Export reports", "Import data", "Send alerts"]
        }));
        let doc = requirements_summary(&spec);

        assert!(doc.contains("1. Export reports\n2. Import data\n3. Send alerts"));
    }

    #[test]
    fn test_user_stories_acme_scenario() {
        let spec = spec_from(json!({
            "project_name": "Acme",
            "goals": ["reduce churn"],
            "functional_requirements": ["Export reports"]
        }));
        let doc = user_stories(&spec);

        assert!(doc.contains("## US-01"));
        assert!(!doc.contains("## US-02"));
        assert!(doc.contains("As a user, I want to export reports so that I can reduce churn."));
        // No constraints supplied, so the constraints criterion is absent
        assert!(!doc.contains("respects the documented constraints"));
    }

    #[test]
    fn test_user_stories_role_and_constraints_line() {
        let spec = spec_from(json!({
            "target_users": ["support engineer", "manager"],
            "goals": ["Resolve Tickets Faster"],
            "functional_requirements": ["Search the knowledge base"],
            "constraints": ["must run on-prem"]
        }));
        let doc = user_stories(&spec);

        assert!(doc.contains(
            "As a support engineer, I want to search the knowledge base so that I can resolve tickets faster."
        ));
        assert!(doc.contains("- The implementation respects the documented constraints."));
    }

    #[test]
    fn test_user_stories_two_digit_numbering() {
        let frs: Vec<String> = (1..=11).map(|i| format!("Requirement {i}")).collect();
        let spec = spec_from(json!({ "functional_requirements": frs }));
        let doc = user_stories(&spec);

        assert!(doc.contains("## US-01"));
        assert!(doc.contains("## US-09"));
        assert!(doc.contains("## US-11"));
    }

    #[test]
    fn test_user_stories_empty_requirements_short_circuit() {
        let doc = user_stories(&RequirementsSpec::default());

        assert!(doc.contains("- No functional requirements were provided."));
        assert!(!doc.contains("## US-"));
        assert!(!doc.contains("### Acceptance Criteria"));
    }

    #[test]
    fn test_user_stories_blank_requirement_fallback() {
        let spec = spec_from(json!({ "functional_requirements": ["   "] }));
        let doc = user_stories(&spec);

        assert!(doc.contains("I want to use the system so that I can"));
    }

    #[test]
    fn test_scope_constraints_sections() {
        let spec = spec_from(json!({
            "project_name": "Acme",
            "goals": ["reduce churn"],
            "non_goals": ["mobile app"],
            "assumptions": ["single region"]
        }));
        let doc = scope_constraints(&spec);

        assert!(doc.starts_with("# Scope & Constraints: Acme\n"));
        assert!(doc.contains("## In Scope (Goals)\n- reduce churn\n"));
        assert!(doc.contains("## Out of Scope (Non-Goals)\n- mobile app\n"));
        assert!(doc.contains("## Assumptions\n- single region\n"));
        assert!(doc.contains("## Constraints\n- N/A\n"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let spec = spec_from(json!({
            "project_name": "Acme",
            "goals": ["reduce churn"],
            "functional_requirements": ["Export reports"]
        }));

        assert_eq!(requirements_summary(&spec), requirements_summary(&spec));
        assert_eq!(user_stories(&spec), user_stories(&spec));
        assert_eq!(scope_constraints(&spec), scope_constraints(&spec));
    }

    #[test]
    fn test_lowercase_first_only_touches_first_char() {
        assert_eq!(lowercase_first("Export Reports"), "export Reports");
        assert_eq!(lowercase_first("already lower"), "already lower");
        assert_eq!(lowercase_first(""), "");
    }
}
