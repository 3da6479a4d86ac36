//! The schema rule engine: direction derivation and the positional
//! membership check for extracted relationships.

use crate::model::Direction;
use crate::schema::Schema;

/// Derive a [`Direction`] from the arrow tokens of a relationship pattern.
pub(crate) fn direction_from_match(left_dir: &str, right_dir: &str) -> Direction {
    match (left_dir == "<-", right_dir == "->") {
        (true, true) => Direction::Both,
        (true, false) => Direction::RightToLeft,
        (false, true) => Direction::LeftToRight,
        (false, false) => Direction::Undirected,
    }
}

/// Whether the schema permits the relationship for any combination of the
/// declared type alternatives and the resolved label sets. Undirected and
/// bidirectional patterns are admitted when either orientation is allowed.
pub(crate) fn is_allowed(
    schema: &Schema,
    edge_types: &[String],
    left_labels: &[String],
    right_labels: &[String],
    direction: Direction,
) -> bool {
    for edge_type in edge_types {
        if matches!(
            direction,
            Direction::LeftToRight | Direction::Both | Direction::Undirected
        ) {
            for left in left_labels {
                for right in right_labels {
                    if schema.allows(edge_type, left, right) {
                        return true;
                    }
                }
            }
        }
        if matches!(
            direction,
            Direction::RightToLeft | Direction::Both | Direction::Undirected
        ) {
            for left in left_labels {
                for right in right_labels {
                    if schema.allows(edge_type, right, left) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Resolve the labels of a node occurrence: explicit labels win, otherwise
/// the union accumulated for the variable across the whole query. Nodes
/// with neither stay unresolved and are skipped by the caller.
pub(crate) fn resolve_labels(
    explicit: &[String],
    variable: Option<&str>,
    variable_labels: &indexmap::IndexMap<String, indexmap::IndexSet<String>>,
) -> Vec<String> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    variable
        .and_then(|variable| variable_labels.get(variable))
        .map(|labels| labels.iter().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;

    fn schema() -> Schema {
        Schema::from_edges([
            ("Endpoint", "HasAddress", "EndpointAddress"),
            ("EndpointAddress", "ListedIn", "EndpointSlice"),
        ])
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn direction_table() {
        assert_eq!(direction_from_match("<-", "->"), Direction::Both);
        assert_eq!(direction_from_match("<-", "-"), Direction::RightToLeft);
        assert_eq!(direction_from_match("-", "->"), Direction::LeftToRight);
        assert_eq!(direction_from_match("-", "-"), Direction::Undirected);
    }

    #[test]
    fn membership_is_positional() {
        let schema = schema();
        assert!(schema.allows("HasAddress", "Endpoint", "EndpointAddress"));
        assert!(!schema.allows("HasAddress", "EndpointAddress", "Endpoint"));
    }

    #[test]
    fn reversed_patterns_check_the_reversed_pair() {
        let schema = schema();
        let types = vec!["HasAddress".to_string()];
        // (ea:EndpointAddress)<-[:HasAddress]-(e:Endpoint)
        assert!(is_allowed(
            &schema,
            &types,
            &labels(&["EndpointAddress"]),
            &labels(&["Endpoint"]),
            Direction::RightToLeft,
        ));
        // (e:Endpoint)<-[:HasAddress]-(ea:EndpointAddress)
        assert!(!is_allowed(
            &schema,
            &types,
            &labels(&["Endpoint"]),
            &labels(&["EndpointAddress"]),
            Direction::RightToLeft,
        ));
    }

    #[test]
    fn undirected_patterns_check_both_orientations() {
        let schema = schema();
        let types = vec!["HasAddress".to_string()];
        for (left, right) in [
            (&["Endpoint"][..], &["EndpointAddress"][..]),
            (&["EndpointAddress"][..], &["Endpoint"][..]),
        ] {
            assert!(is_allowed(
                &schema,
                &types,
                &labels(left),
                &labels(right),
                Direction::Undirected,
            ));
            assert!(is_allowed(
                &schema,
                &types,
                &labels(left),
                &labels(right),
                Direction::Both,
            ));
        }
    }

    #[test]
    fn any_type_alternative_admits() {
        let schema = schema();
        let types = vec!["ListedIn".to_string(), "HasAddress".to_string()];
        assert!(is_allowed(
            &schema,
            &types,
            &labels(&["Endpoint"]),
            &labels(&["EndpointAddress"]),
            Direction::LeftToRight,
        ));
    }
}
