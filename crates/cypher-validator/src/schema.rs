//! The graph schema: an immutable mapping from relationship type to the
//! set of permitted `(source, destination)` label pairs.

use indexmap::IndexMap;
use indexmap::IndexSet;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Matches relationship declarations of the form `(:Src)-[:Edge]->(:Dst)`.
fn relationship_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\(:(?P<src>[A-Za-z_][\w]*)\)\s*-\s*\[:(?P<edge>[A-Za-z_][\w]*)\]\s*->\s*\(:(?P<dst>[A-Za-z_][\w]*)\)",
        )
        .expect("the relationship declaration pattern is valid")
    })
}

/// The structured schema form: `{ "relationships": [{ "from", "edge",
/// "to" }, ..] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchemaPayload {
    pub relationships: Vec<RelationshipDecl>,
}

/// One relationship declaration of a [`SchemaPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationshipDecl {
    #[serde(rename = "from")]
    pub source: String,
    pub edge: String,
    #[serde(rename = "to")]
    pub target: String,
}

/// An immutable relationship schema.
///
/// Both the edge-type map and the pair sets keep insertion order, which
/// makes diagnostics (`allowed_pairs`) deterministic and ordered by first
/// declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    relationships: IndexMap<String, IndexSet<(String, String)>>,
}

impl Schema {
    /// Build a schema from `(source, edge, destination)` triples.
    pub fn from_edges<S, I>(edges: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, S, S)>,
    {
        let mut relationships: IndexMap<String, IndexSet<(String, String)>> = IndexMap::new();
        for (source, edge, target) in edges {
            relationships
                .entry(edge.into())
                .or_default()
                .insert((source.into(), target.into()));
        }
        Self { relationships }
    }

    /// Build a schema from text containing `(:Src)-[:Edge]->(:Dst)`
    /// declarations (whitespace permissive, one or more per line). Text
    /// that matches nothing yields an empty schema.
    pub fn parse_text(text: &str) -> Self {
        let edges = relationship_line_re().captures_iter(text).map(|captures| {
            (
                captures["src"].to_string(),
                captures["edge"].to_string(),
                captures["dst"].to_string(),
            )
        });
        Self::from_edges(edges)
    }

    /// Build a schema from the structured JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let payload: SchemaPayload = serde_json::from_str(json)?;
        Ok(Self::from_payload(payload))
    }

    /// Build a schema from an already-deserialized payload.
    pub fn from_payload(payload: SchemaPayload) -> Self {
        Self::from_edges(
            payload
                .relationships
                .into_iter()
                .map(|decl| (decl.source, decl.edge, decl.target)),
        )
    }

    /// Positional membership test: whether `edge_type` permits exactly
    /// `(src_label, dst_label)`. Unknown edge types permit nothing.
    pub fn allows(&self, edge_type: &str, src_label: &str, dst_label: &str) -> bool {
        self.relationships.get(edge_type).is_some_and(|pairs| {
            pairs
                .iter()
                .any(|(src, dst)| src == src_label && dst == dst_label)
        })
    }

    /// Every pair the schema permits for the given edge types, in
    /// first-declared order, deduplicated across types.
    pub fn allowed_pairs(&self, edge_types: &[String]) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for edge_type in edge_types {
            if let Some(declared) = self.relationships.get(edge_type) {
                for pair in declared {
                    if !pairs.contains(pair) {
                        pairs.push(pair.clone());
                    }
                }
            }
        }
        pairs
    }

    /// The number of declared edge types.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// The declared edge types, in declaration order.
    pub fn edge_types(&self) -> impl Iterator<Item = &str> {
        self.relationships.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_from_triples() {
        let schema = Schema::from_edges([
            ("Host", "IsClaimedBy", "Ingress"),
            ("Service", "Manages", "EndpointSlice"),
            ("Deployment", "Manages", "ReplicaSet"),
        ]);
        assert_eq!(schema.len(), 2);
        assert!(schema.allows("IsClaimedBy", "Host", "Ingress"));
        assert!(schema.allows("Manages", "Deployment", "ReplicaSet"));
        assert!(!schema.allows("IsClaimedBy", "Ingress", "Host"));
        assert!(!schema.allows("Unknown", "Host", "Ingress"));
    }

    #[test]
    fn parses_declarations_from_text() {
        let text = "\
            # relationship shapes\n\
            (:Host)-[:IsClaimedBy]->(:Ingress)\n\
            (:Service) - [:Manages] -> (:EndpointSlice) (:EndpointSlice)-[:ContainsEndpoint]->(:Endpoint)\n\
            this line is ignored\n";
        let schema = Schema::parse_text(text);
        assert_eq!(schema.len(), 3);
        assert!(schema.allows("Manages", "Service", "EndpointSlice"));
        assert!(schema.allows("ContainsEndpoint", "EndpointSlice", "Endpoint"));
    }

    #[test]
    fn parses_the_structured_form() {
        let json = r#"{
            "relationships": [
                {"from": "Host", "edge": "IsClaimedBy", "to": "Ingress"},
                {"from": "Ingress", "edge": "DefinesBackend", "to": "IngressServiceBackend"}
            ]
        }"#;
        let schema = Schema::from_json(json).unwrap();
        assert!(schema.allows("IsClaimedBy", "Host", "Ingress"));
        assert!(schema.allows("DefinesBackend", "Ingress", "IngressServiceBackend"));
        assert!(!schema.allows("DefinesBackend", "Host", "IngressServiceBackend"));
    }

    #[test]
    fn both_forms_yield_the_same_schema() {
        let text = "(:Pod)-[:BelongsTo]->(:Namespace)";
        let json = r#"{"relationships": [{"from": "Pod", "edge": "BelongsTo", "to": "Namespace"}]}"#;
        assert_eq!(Schema::parse_text(text), Schema::from_json(json).unwrap());
    }

    #[test]
    fn allowed_pairs_keep_declaration_order() {
        let schema = Schema::from_edges([
            ("Deployment", "Manages", "ReplicaSet"),
            ("ReplicaSet", "Manages", "Pod"),
            ("StatefulSet", "Manages", "Pod"),
            ("Deployment", "Manages", "ReplicaSet"),
        ]);
        assert_eq!(
            schema.allowed_pairs(&["Manages".to_string()]),
            vec![
                ("Deployment".to_string(), "ReplicaSet".to_string()),
                ("ReplicaSet".to_string(), "Pod".to_string()),
                ("StatefulSet".to_string(), "Pod".to_string()),
            ]
        );
        assert!(schema.allowed_pairs(&["Unknown".to_string()]).is_empty());
    }
}
