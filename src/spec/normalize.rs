//! Schema normalization into the canonical requirements shape
//!
//! [`normalize`] is total over any JSON object: whatever shape the model
//! produced, the result satisfies every invariant of [`RequirementsSpec`] -
//! all fields present, correctly typed, no nulls anywhere. There is no
//! error path by design; downstream rendering never has to defend itself.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The canonical structured requirements object.
///
/// Sequence fields preserve insertion order; rendered numbering follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementsSpec {
    pub project_name: String,
    pub problem_statement: String,
    pub target_users: Vec<String>,
    pub goals: Vec<String>,
    pub non_goals: Vec<String>,
    pub functional_requirements: Vec<String>,
    pub non_functional_requirements: NonFunctionalRequirements,
    pub core_entities: Vec<String>,
    pub assumptions: Vec<String>,
    pub constraints: Vec<String>,
    pub open_questions: Vec<String>,
}

/// Fixed-shape non-functional requirements mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonFunctionalRequirements {
    pub performance: String,
    pub security: String,
    pub scalability: String,
    pub availability: String,
}

/// Coerce an arbitrary JSON object into a [`RequirementsSpec`].
///
/// Unknown keys are dropped, missing keys take defaults, null list elements
/// are removed, and non-string values are replaced by their JSON rendering.
pub fn normalize(input: &Map<String, Value>) -> RequirementsSpec {
    let nfr = input.get("non_functional_requirements").and_then(Value::as_object);

    RequirementsSpec {
        project_name: coerce_string(input.get("project_name")),
        problem_statement: coerce_string(input.get("problem_statement")),
        target_users: coerce_list(input.get("target_users")),
        goals: coerce_list(input.get("goals")),
        non_goals: coerce_list(input.get("non_goals")),
        functional_requirements: coerce_list(input.get("functional_requirements")),
        non_functional_requirements: NonFunctionalRequirements {
            performance: coerce_string(nfr.and_then(|m| m.get("performance"))),
            security: coerce_string(nfr.and_then(|m| m.get("security"))),
            scalability: coerce_string(nfr.and_then(|m| m.get("scalability"))),
            availability: coerce_string(nfr.and_then(|m| m.get("availability"))),
        },
        core_entities: coerce_list(input.get("core_entities")),
        assumptions: coerce_list(input.get("assumptions")),
        constraints: coerce_list(input.get("constraints")),
        open_questions: coerce_list(input.get("open_questions")),
    }
}

/// Missing and null become empty; anything non-string becomes its JSON text.
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Sequences keep non-null elements (stringified); null and the empty
/// string become empty sequences; any other scalar wraps as one element.
fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(element_to_string)
            .collect(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(other) => vec![other.to_string()],
    }
}

fn element_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
