//! Pre-parse rewrites and the segmented-parse fallback.
//!
//! Two tolerated-but-ungrammatical `EXISTS` forms are rewritten into
//! accepted ones before parsing:
//!
//! 1. Pattern-form `EXISTS((s)-[:T]->(x))` becomes the subquery form
//!    `EXISTS { MATCH (s)-[:T]->(x) RETURN 1 }`.
//! 2. Subquery-form `EXISTS { .. }` without a top-level `RETURN` gets
//!    ` RETURN 1` appended before the closing brace, recursively.
//!
//! Both rewrites preserve byte positions outside the rewritten spans and
//! are idempotent.

use crate::scan::has_top_level_return;
use crate::scan::is_word_boundary;
use crate::scan::looks_like_pattern_expression;
use crate::scan::match_balanced;
use crate::scan::split_top_level;
use regex::Regex;
use std::sync::OnceLock;

fn clause_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(OPTIONAL\s+MATCH|MATCH|UNWIND|CALL|CREATE|MERGE|SET|DELETE|DETACH|REMOVE|RETURN)\b",
        )
        .expect("the clause-start pattern is valid")
    })
}

fn return_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bRETURN\b").expect("the RETURN pattern is valid"))
}

fn write_clause_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(CREATE|MERGE|SET|DELETE|DETACH|REMOVE)\b")
            .expect("the write-clause pattern is valid")
    })
}

/// Rewrite tolerated `EXISTS` forms into accepted ones. See the module
/// docs; applied once per validation, idempotent.
pub(crate) fn normalize_exists_subqueries(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut result = String::with_capacity(text.len());
    let mut last = 0usize;
    let mut i = 0usize;
    let mut in_string = false;
    let mut in_backtick = false;
    while i < bytes.len() {
        let byte = bytes[i];
        if in_string {
            if byte == b'\'' && i + 1 < bytes.len() && bytes[i + 1] == b'\'' {
                i += 2;
                continue;
            }
            if byte == b'\'' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if in_backtick {
            if byte == b'`' {
                in_backtick = false;
            }
            i += 1;
            continue;
        }
        if byte == b'\'' {
            in_string = true;
            i += 1;
            continue;
        }
        if byte == b'`' {
            in_backtick = true;
            i += 1;
            continue;
        }
        if bytes[i..].len() >= 6
            && bytes[i..i + 6].eq_ignore_ascii_case(b"EXISTS")
            && is_word_boundary(text, i, i + 6)
        {
            let mut j = i + 6;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'{' {
                let Some(end) = match_balanced(text, j, b'{', b'}') else {
                    break;
                };
                let body = &text[j + 1..end];
                let mut normalized_body = normalize_exists_subqueries(body);
                if !has_top_level_return(&normalized_body) {
                    let trimmed = normalized_body.trim_end();
                    normalized_body = if trimmed.is_empty() {
                        "RETURN 1".to_string()
                    } else {
                        format!("{trimmed} RETURN 1")
                    };
                }
                result.push_str(&text[last..i]);
                result.push_str(&text[i..j]);
                result.push('{');
                result.push_str(&normalized_body);
                result.push('}');
                i = end + 1;
                last = i;
                continue;
            }
            if j < bytes.len() && bytes[j] == b'(' {
                let Some(end) = match_balanced(text, j, b'(', b')') else {
                    break;
                };
                let body = text[j + 1..end].trim();
                if looks_like_pattern_expression(body) {
                    result.push_str(&text[last..i]);
                    result.push_str("EXISTS { MATCH ");
                    result.push_str(body);
                    result.push_str(" RETURN 1 }");
                    i = end + 1;
                    last = i;
                    continue;
                }
            }
        }
        i += 1;
    }
    result.push_str(&text[last..]);
    result
}

/// Produce the fallback segments of a query that failed to parse whole:
/// split at top-level `WITH`, trim each segment to its first clause
/// keyword, drop trailing semicolons and append ` RETURN 1` to read-only
/// segments without a projection. Segments with no clause keyword at all
/// are dropped.
pub(crate) fn segment_queries(text: &str) -> Vec<String> {
    split_top_level(text, "WITH")
        .into_iter()
        .filter_map(strip_to_first_clause)
        .map(ensure_return_clause)
        .collect()
}

fn strip_to_first_clause(segment: &str) -> Option<&str> {
    clause_start_re()
        .find(segment)
        .map(|found| segment[found.start()..].trim())
}

fn ensure_return_clause(segment: &str) -> String {
    let trimmed = segment.trim().trim_end_matches(';');
    if return_re().is_match(trimmed) || write_clause_re().is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{trimmed} RETURN 1")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rewrites_the_pattern_form() {
        let input = "MATCH (s:Service) WHERE NOT EXISTS((s)-[:Manages]->(:EndpointSlice)) RETURN s";
        let expected = "MATCH (s:Service) WHERE NOT EXISTS { MATCH (s)-[:Manages]->(:EndpointSlice) RETURN 1 } RETURN s";
        assert_eq!(normalize_exists_subqueries(input), expected);
    }

    #[test]
    fn appends_return_to_subquery_bodies() {
        let input = "MATCH (s:Service) WHERE NOT EXISTS { MATCH (s)-[:Manages]->(:EndpointSlice) } RETURN s";
        let expected = "MATCH (s:Service) WHERE NOT EXISTS { MATCH (s)-[:Manages]->(:EndpointSlice) RETURN 1} RETURN s";
        assert_eq!(normalize_exists_subqueries(input), expected);
    }

    #[test]
    fn leaves_bodies_with_a_return_alone() {
        let input = "WHERE EXISTS { MATCH (s)-[:Manages]->(x) RETURN x } RETURN 1";
        assert_eq!(normalize_exists_subqueries(input), input);
    }

    #[test]
    fn recurses_into_nested_subqueries() {
        let input = "WHERE EXISTS { MATCH (d) WHERE EXISTS { MATCH (d)-[:Manages]->(p) } RETURN d } RETURN 1";
        let expected = "WHERE EXISTS { MATCH (d) WHERE EXISTS { MATCH (d)-[:Manages]->(p) RETURN 1} RETURN d } RETURN 1";
        assert_eq!(normalize_exists_subqueries(input), expected);
    }

    #[test]
    fn exists_in_strings_and_backticks_is_untouched() {
        let input = "MATCH (n) WHERE n.a = 'EXISTS { x }' AND n.`EXISTS {` = 1 RETURN n";
        assert_eq!(normalize_exists_subqueries(input), input);
    }

    #[test]
    fn property_form_is_not_rewritten() {
        let input = "MATCH (n) WHERE EXISTS(n.metadata) RETURN n";
        assert_eq!(normalize_exists_subqueries(input), input);
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "MATCH (s:Service) WHERE NOT EXISTS((s)-[:Manages]->(:EndpointSlice)) RETURN s",
            "MATCH (s:Service) WHERE NOT EXISTS { MATCH (s)-[:Manages]->(:EndpointSlice) } RETURN s",
            "MATCH (ns:Namespace)<-[:BelongsTo]-(p:Pod) WHERE NOT EXISTS { MATCH (d:Deployment)-[:Manages]->(p) } AND NOT EXISTS { MATCH (j:Job)-[:Manages]->(p) } RETURN p",
        ];
        for input in inputs {
            let once = normalize_exists_subqueries(input);
            let twice = normalize_exists_subqueries(&once);
            assert_eq!(once, twice, "{input}");
        }
    }

    #[test]
    fn segments_are_trimmed_and_projected() {
        let segments =
            segment_queries("MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress) WITH h, i WITH h RETURN h");
        assert_eq!(
            segments,
            vec![
                "MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress) RETURN 1".to_string(),
                "RETURN h".to_string(),
            ]
        );
    }

    #[test]
    fn write_segments_do_not_get_a_projection() {
        let segments = segment_queries("MATCH (p:Pod) SET p.seen = true;");
        assert_eq!(
            segments,
            vec!["MATCH (p:Pod) SET p.seen = true".to_string()]
        );
    }

    #[test]
    fn segments_without_clauses_are_dropped() {
        let segments = segment_queries("h, i");
        assert!(segments.is_empty());
    }
}
