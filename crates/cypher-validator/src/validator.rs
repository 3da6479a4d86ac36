//! The validator: wires normalization, parsing, fallback segmentation,
//! compatibility checks and schema rules into a single `validate` call.

use crate::compatibility::find_compatibility_issues;
use crate::error::ValidationError;
use crate::extract::collect_patterns;
use crate::model::SchemaViolation;
use crate::normalize::normalize_exists_subqueries;
use crate::normalize::segment_queries;
use crate::rules;
use crate::schema::Schema;
use cypher_parser::Parser;
use cypher_parser::SyntaxTree;
use tracing::debug;
use tracing::warn;

/// Validates Cypher queries against a relationship schema before they are
/// sent to the store.
///
/// The validator is long-lived and cheap to share: it holds only the
/// schema, which is immutable, so a single instance is safe to use from
/// multiple threads. All per-call state lives on the stack of
/// [`validate`](CypherValidator::validate).
#[derive(Debug, Clone)]
pub struct CypherValidator {
    schema: triomphe::Arc<Schema>,
}

impl CypherValidator {
    /// Create a validator for a schema.
    pub fn new(schema: Schema) -> Self {
        debug!(edge_types = schema.len(), "creating cypher validator");
        Self {
            schema: triomphe::Arc::new(schema),
        }
    }

    /// Get a reference to the validator's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a query. Returns `Ok(())` on admission, or exactly one
    /// [`ValidationError`] describing the first failing stage.
    pub fn validate(&self, cypher: &str) -> Result<(), ValidationError> {
        let mut used_fallback = false;
        let trees = match parse(cypher) {
            Ok(tree) => vec![tree],
            Err(original_error) => {
                let normalized = normalize_exists_subqueries(cypher);
                match parse(&normalized) {
                    Ok(tree) => vec![tree],
                    Err(_) => {
                        let trees: Vec<SyntaxTree> = segment_queries(&normalized)
                            .iter()
                            .filter_map(|segment| parse(segment).ok())
                            .collect();
                        if trees.is_empty() {
                            return Err(ValidationError::Syntax(original_error));
                        }
                        used_fallback = true;
                        warn!("cypher parse failed; using fallback segmentation for schema validation");
                        trees
                    }
                }
            }
        };

        let whole_parse = (!used_fallback).then(|| &trees[0]);
        let issues = find_compatibility_issues(cypher, whole_parse);
        if !issues.is_empty() {
            if used_fallback {
                warn!("compatibility checks are partial due to fallback parsing");
            }
            return Err(ValidationError::Compatibility(issues));
        }

        let collection = collect_patterns(&trees);

        let mut violations: Vec<SchemaViolation> = Vec::new();
        for relationship in &collection.relationships {
            if relationship.edge_types.is_empty() {
                continue;
            }
            let left_labels = rules::resolve_labels(
                &relationship.left_node.labels,
                relationship.left_node.variable.as_deref(),
                &collection.variable_labels,
            );
            let right_labels = rules::resolve_labels(
                &relationship.right_node.labels,
                relationship.right_node.variable.as_deref(),
                &collection.variable_labels,
            );
            if left_labels.is_empty() || right_labels.is_empty() {
                continue;
            }
            let direction =
                rules::direction_from_match(relationship.left_dir, relationship.right_dir);
            if rules::is_allowed(
                &self.schema,
                &relationship.edge_types,
                &left_labels,
                &right_labels,
                direction,
            ) {
                continue;
            }
            violations.push(SchemaViolation {
                edge_type: relationship.edge_types.join("|"),
                left_labels,
                right_labels,
                direction,
                snippet: relationship.snippet.clone(),
                rule_path: relationship.rule_path.clone(),
                allowed_pairs: self.schema.allowed_pairs(&relationship.edge_types),
            });
        }
        if !violations.is_empty() {
            return Err(ValidationError::Schema(violations));
        }
        Ok(())
    }
}

/// Parse a query with recovery disabled: any lexical or syntactic error
/// fails the parse, with all messages joined.
fn parse(text: &str) -> Result<SyntaxTree, String> {
    let tree = Parser::new(text).parse();
    if tree.errors().is_empty() {
        Ok(tree)
    } else {
        let messages = tree
            .errors()
            .iter()
            .map(|error| format!("{error:?}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(format!("Cypher parse failed: {messages}"))
    }
}
