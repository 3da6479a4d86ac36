//! Pattern extraction: walk parse trees and produce the relationship
//! occurrences and per-variable label sets the schema rules consume.

use crate::model::NodeUse;
use crate::model::RelationshipUse;
use cypher_parser::cst;
use cypher_parser::cst::CstNode;
use cypher_parser::SyntaxNode;
use cypher_parser::SyntaxTree;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// Everything pattern-shaped found across the parse trees of one
/// validation.
#[derive(Debug, Default)]
pub(crate) struct PatternCollection {
    /// Union of labels ever declared for each variable, in first-seen
    /// order.
    pub(crate) variable_labels: IndexMap<String, IndexSet<String>>,
    /// Every relationship occurrence, in source order.
    pub(crate) relationships: Vec<RelationshipUse>,
}

/// Collect node and relationship uses from every tree of this validation.
/// Trees are walked in order, so diagnostics are deterministic.
pub(crate) fn collect_patterns(trees: &[SyntaxTree]) -> PatternCollection {
    let mut collection = PatternCollection::default();
    for tree in trees {
        let cypher = tree.cypher();

        for node in cypher.node_patterns() {
            let node_use = node_use(&node);
            if let (Some(variable), false) = (&node_use.variable, node_use.labels.is_empty()) {
                collection
                    .variable_labels
                    .entry(variable.clone())
                    .or_default()
                    .extend(node_use.labels.iter().cloned());
            }
        }

        for element in cypher.pattern_elements() {
            let Some(start) = element.node_pattern() else {
                continue;
            };
            let mut current = node_use(&start);
            for chain in element.chains() {
                let Some(relationship) = chain.relationship_pattern() else {
                    continue;
                };
                let Some(next_pattern) = chain.node_pattern() else {
                    continue;
                };
                let next = node_use(&next_pattern);

                let edge_types = relationship
                    .detail()
                    .and_then(|detail| detail.types())
                    .map(|types| types.names().map(|name| name.text()).collect())
                    .unwrap_or_default();
                let edge_text = relationship.detail_text();
                let left_dir = if relationship.has_left_arrow() { "<-" } else { "-" };
                let right_dir = if relationship.has_right_arrow() { "->" } else { "-" };
                let snippet = format!(
                    "({}){}[{}]{}({})",
                    current.text, left_dir, edge_text, right_dir, next.text
                );

                collection.relationships.push(RelationshipUse {
                    left_node: current.clone(),
                    right_node: next.clone(),
                    edge_text,
                    edge_types,
                    left_dir,
                    right_dir,
                    snippet,
                    rule_path: rule_path(relationship.syntax()),
                });
                current = next;
            }
        }
    }
    collection
}

fn node_use(node: &cst::NodePattern) -> NodeUse {
    NodeUse {
        text: node.inner_text(),
        variable: node.variable().map(|variable| variable.text()),
        labels: node
            .labels()
            .map(|labels| labels.names().map(|name| name.text()).collect())
            .unwrap_or_default(),
    }
}

/// The `/`-joined rule names from the tree root down to `node`.
fn rule_path(node: &SyntaxNode) -> String {
    let mut names: Vec<String> = node
        .ancestors()
        .map(|ancestor| format!("{:?}", ancestor.kind()))
        .collect();
    names.reverse();
    names.join("/")
}
