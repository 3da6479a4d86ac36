use cypher_validator::{CypherValidator, Direction, Schema, ValidationError};
use pretty_assertions::assert_eq;

fn validator() -> CypherValidator {
    let schema = Schema::from_edges([
        ("Host", "IsClaimedBy", "Ingress"),
        ("Ingress", "DefinesBackend", "IngressServiceBackend"),
        ("IngressServiceBackend", "TargetsService", "Service"),
        ("Service", "Manages", "EndpointSlice"),
        ("EndpointSlice", "ContainsEndpoint", "Endpoint"),
        ("Endpoint", "HasAddress", "EndpointAddress"),
        ("EndpointAddress", "IsAddressOf", "Pod"),
        ("EndpointAddress", "ListedIn", "EndpointSlice"),
        ("Pod", "BelongsTo", "Namespace"),
        ("Deployment", "Manages", "ReplicaSet"),
        ("ReplicaSet", "Manages", "Pod"),
        ("StatefulSet", "Manages", "Pod"),
        ("DaemonSet", "Manages", "Pod"),
        ("Job", "Manages", "Pod"),
    ]);
    CypherValidator::new(schema)
}

#[test]
fn accepts_a_full_resolution_path() {
    let cypher = "MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress)\
        -[:DefinesBackend]->(b:IngressServiceBackend)\
        -[:TargetsService]->(s:Service)\
        -[:Manages]->(es:EndpointSlice)\
        -[:ContainsEndpoint]->(e:Endpoint)\
        -[:HasAddress]->(ea:EndpointAddress)\
        -[:IsAddressOf]->(p:Pod) \
        RETURN p";
    validator().validate(cypher).unwrap();
}

#[test]
fn rejects_a_reversed_edge() {
    let cypher = "MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress)\
        -[:DefinesBackend]->(b:IngressServiceBackend)\
        -[:TargetsService]->(s:Service)\
        -[:Manages]->(es:EndpointSlice)\
        -[:ContainsEndpoint]->(e:Endpoint)\
        <-[:HasAddress]-(ea:EndpointAddress)\
        -[:IsAddressOf]->(p:Pod) \
        RETURN p";
    let violations = match validator().validate(cypher).unwrap_err() {
        ValidationError::Schema(violations) => violations,
        other => panic!("expected a schema error, got {other:?}"),
    };
    assert_eq!(violations.len(), 1);
    let violation = &violations[0];
    assert_eq!(violation.edge_type, "HasAddress");
    assert_eq!(violation.left_labels, vec!["Endpoint"]);
    assert_eq!(violation.right_labels, vec!["EndpointAddress"]);
    assert_eq!(violation.direction, Direction::RightToLeft);
    assert_eq!(
        violation.snippet,
        "(e:Endpoint)<-[:HasAddress]-(ea:EndpointAddress)"
    );
    assert_eq!(
        violation.allowed_pairs,
        vec![("Endpoint".to_string(), "EndpointAddress".to_string())]
    );
}

#[test]
fn accepts_exists_subquery_without_return() {
    let cypher = "MATCH (s:Service)\n\
        WHERE NOT EXISTS { MATCH (s)-[:Manages]->(:EndpointSlice) }\n\
        RETURN s['metadata']['namespace'] AS namespace,\n\
        \x20      s['metadata']['name'] AS service\n\
        ORDER BY namespace, service";
    validator().validate(cypher).unwrap();
}

#[test]
fn accepts_exists_pattern_function() {
    let cypher = "MATCH (s:Service)\n\
        WHERE NOT EXISTS((s)-[:Manages]->(:EndpointSlice))\n\
        RETURN s['metadata']['name'] AS service";
    validator().validate(cypher).unwrap();
}

#[test]
fn rejects_an_unsupported_function() {
    let error = validator()
        .validate("MATCH (n:Pod) RETURN time() AS now")
        .unwrap_err();
    assert_eq!(
        error,
        ValidationError::Compatibility(vec!["Function 'time' is not supported".to_string()])
    );
}

#[test]
fn rejects_exists_on_a_property() {
    let error = validator()
        .validate("MATCH (n:Pod) WHERE exists(n.metadata) RETURN n")
        .unwrap_err();
    assert_eq!(
        error,
        ValidationError::Compatibility(vec![
            "exists(n.property) is not supported; use IS NOT NULL".to_string()
        ])
    );
}

#[test]
fn propagates_variable_labels_across_with_boundaries() {
    let cypher = "MATCH (p:Pod)-[:BelongsTo]->(ns:Namespace) \
        WITH p MATCH (p)-[:BelongsTo]->(ns2:Namespace) RETURN p";
    validator().validate(cypher).unwrap();
}

#[test]
fn rejects_inline_property_maps_in_match() {
    let cypher =
        "MATCH (p:Pod {metadata: {name: 'x'}})-[:BelongsTo]->(ns:Namespace) RETURN p";
    let issues = match validator().validate(cypher).unwrap_err() {
        ValidationError::Compatibility(issues) => issues,
        other => panic!("expected a compatibility error, got {other:?}"),
    };
    assert_eq!(issues.len(), 1);
    assert!(
        issues[0].starts_with("Inline property maps in MATCH"),
        "{}",
        issues[0]
    );
}

#[test]
fn accepts_multiple_with_clauses() {
    validator()
        .validate("MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress) WITH h, i WITH h RETURN h")
        .unwrap();
}

#[test]
fn rejects_the_wrong_direction_in_a_multiline_query() {
    let cypher = "MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress)\n\
        WHERE h.name = 'litmus.qa.example.com'\n\
        MATCH (i)-[:DefinesBackend]->(b:IngressServiceBackend)-[:TargetsService]->(s:Service)\n\
        MATCH (s)-[:Manages]->(es:EndpointSlice)-[:ContainsEndpoint]->(e:Endpoint)\n\
        MATCH (e)<-[:HasAddress]-(ea:EndpointAddress)-[:IsAddressOf]->(p:Pod)\n\
        RETURN DISTINCT\n\
        \x20 p['metadata']['namespace'] AS namespace,\n\
        \x20 p['metadata']['name'] AS pod\n\
        ORDER BY namespace, pod";
    let error = validator().validate(cypher).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("HasAddress"), "{message}");
    assert!(message.contains("Endpoint"), "{message}");
    assert!(message.contains("EndpointAddress"), "{message}");
    assert!(message.contains("[rule="), "{message}");
    assert!(message.contains("Hint:"), "{message}");
}

#[test]
fn accepts_the_valid_multiline_query() {
    let cypher = "MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress)-[:DefinesBackend]->(b:IngressServiceBackend)\
        -[:TargetsService]->(s:Service)-[:Manages]->(es:EndpointSlice)-[:ContainsEndpoint]->(e:Endpoint)\
        -[:HasAddress]->(ea:EndpointAddress)-[:IsAddressOf]->(p:Pod)\n\
        WHERE h.name = 'litmus.qa.example.com'\n\
        RETURN DISTINCT\n\
        \x20 p['metadata']['namespace'] AS namespace,\n\
        \x20 p['metadata']['name'] AS pod,\n\
        \x20 p['status']['phase'] AS phase\n\
        ORDER BY namespace, pod;";
    validator().validate(cypher).unwrap();
}

#[test]
fn accepts_multiple_exists_subqueries_without_return() {
    let cypher = "MATCH (ns:Namespace)<-[:BelongsTo]-(p:Pod)\n\
        WHERE ns['metadata']['name'] = 'litmus'\n\
        \x20 AND NOT EXISTS { MATCH (d:Deployment)-[:Manages]->(rs:ReplicaSet)-[:Manages]->(p) }\n\
        \x20 AND NOT EXISTS { MATCH (ss:StatefulSet)-[:Manages]->(p) }\n\
        \x20 AND NOT EXISTS { MATCH (ds:DaemonSet)-[:Manages]->(p) }\n\
        \x20 AND NOT EXISTS { MATCH (j:Job)-[:Manages]->(p) }\n\
        \x20 AND NOT EXISTS { MATCH (rs2:ReplicaSet)-[:Manages]->(p) }\n\
        RETURN p['metadata']['name'] AS pod\n\
        ORDER BY pod";
    validator().validate(cypher).unwrap();
}

#[test]
fn unlabeled_variables_are_not_schema_checked() {
    validator()
        .validate("MATCH (a)-[:HasAddress]->(b) RETURN a")
        .unwrap();
    validator()
        .validate("MATCH (a)<-[:HasAddress]-(b) RETURN a")
        .unwrap();
}

#[test]
fn unparseable_queries_are_syntax_errors() {
    let message = match validator().validate("MATCH ((( RETURN").unwrap_err() {
        ValidationError::Syntax(message) => message,
        other => panic!("expected a syntax error, got {other:?}"),
    };
    assert!(message.starts_with("Cypher parse failed:"), "{message}");
}

#[test]
fn fallback_segmentation_still_runs_textual_checks() {
    // The first segment does not parse; the second does, so validation
    // proceeds on the fallback path. The textual SHORTEST rule still
    // rejects the query as a whole.
    let cypher = "MATCH (n:Pod) SHORTEST oops WITH n MATCH (m:Pod) RETURN m";
    let issues = match validator().validate(cypher).unwrap_err() {
        ValidationError::Compatibility(issues) => issues,
        other => panic!("expected a compatibility error, got {other:?}"),
    };
    assert_eq!(
        issues,
        vec!["SHORTEST keyword is not supported; use Memgraph path syntax".to_string()]
    );
}

#[test]
fn fallback_segmentation_skips_ast_checks() {
    // `time()` sits in the segment that parses, but AST-level rules are
    // disabled on the fallback path, so the query is admitted.
    let cypher = "MATCH (n:Pod) -- WITH n RETURN time() AS now";
    validator().validate(cypher).unwrap();
}

#[test]
fn fallback_segments_are_schema_checked() {
    let cypher = "MATCH (n:Pod) -- WITH e MATCH (e:Endpoint)<-[:HasAddress]-(ea:EndpointAddress) RETURN e";
    let error = validator().validate(cypher).unwrap_err();
    assert!(matches!(error, ValidationError::Schema(_)), "{error:?}");
}

#[test]
fn validation_is_deterministic() {
    let validator = validator();
    let cypher = "MATCH (e:Endpoint)<-[:HasAddress]-(ea:EndpointAddress) RETURN e";
    let first = validator.validate(cypher).unwrap_err();
    let second = validator.validate(cypher).unwrap_err();
    let third = validator.validate(cypher).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn type_alternatives_admit_when_any_matches() {
    validator()
        .validate("MATCH (d:Deployment)-[:Manages|Owns]->(rs:ReplicaSet) RETURN rs")
        .unwrap();
}

#[test]
fn unknown_edge_types_report_no_allowed_pairs() {
    let violations = match validator()
        .validate("MATCH (p:Pod)-[:Hosts]->(ns:Namespace) RETURN p")
        .unwrap_err()
    {
        ValidationError::Schema(violations) => violations,
        other => panic!("expected a schema error, got {other:?}"),
    };
    assert!(violations[0].allowed_pairs.is_empty());
    assert!(error_to_message(&violations).contains("Allowed: none."));
}

fn error_to_message(violations: &[cypher_validator::SchemaViolation]) -> String {
    ValidationError::Schema(violations.to_vec()).to_string()
}
