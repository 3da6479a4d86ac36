//! The validation error sum type and its diagnostic rendering.
//!
//! Exactly one variant is produced per validation; the first failing
//! pipeline stage short-circuits. Rendering is a pure function of the
//! variant, suitable for feeding back into a translation retry loop or
//! showing to a human.

use crate::model::SchemaViolation;

/// The outcome of a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The query did not parse, normalization did not help, and no
    /// fallback segment parsed either. Carries the original parser
    /// messages.
    #[error("{0}")]
    Syntax(String),

    /// The query parsed but uses constructs the engine does not support.
    #[error("{}", format_compatibility_issues(.0))]
    Compatibility(Vec<String>),

    /// The query parsed and is compatible, but one or more relationship
    /// patterns are not permitted by the schema.
    #[error("{}", format_schema_violations(.0))]
    Schema(Vec<SchemaViolation>),
}

fn format_compatibility_issues(issues: &[String]) -> String {
    let mut message = String::from("Cypher uses constructs not supported by Memgraph:");
    for issue in issues {
        message.push_str("\n- ");
        message.push_str(issue);
    }
    message
}

fn format_schema_violations(violations: &[SchemaViolation]) -> String {
    let mut lines = vec!["Cypher schema validation failed:".to_string()];
    for violation in violations {
        let allowed = format_allowed_pairs(&violation.allowed_pairs);
        lines.push(format!(
            "- Invalid relationship: {} {} {} via {}. Allowed: {}. Pattern: {} [rule={}]",
            violation.left_labels.join(","),
            violation.direction.arrow(),
            violation.right_labels.join(","),
            violation.edge_type,
            allowed,
            violation.snippet,
            violation.rule_path,
        ));
        lines.push(format!(
            "  Hint: {} is only allowed as {}. Check direction and node labels.",
            violation.edge_type, allowed,
        ));
    }
    lines.join("\n")
}

fn format_allowed_pairs(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return "none".to_string();
    }
    pairs
        .iter()
        .map(|(src, dst)| format!("{src} -> {dst}"))
        .collect::<Vec<_>>()
        .join("; ")
}
