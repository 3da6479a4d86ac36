//! Memgraph compatibility checks.
//!
//! Two layers: textual rules run on the string-literal-stripped query text
//! for every validation, AST rules walk function invocations and only run
//! when the whole query parsed (segmented fallback trees are excluded so
//! diagnostics stay deterministic).

use crate::scan::looks_like_pattern_expression;
use crate::scan::match_balanced;
use crate::scan::strip_string_literals;
use cypher_parser::SyntaxTree;
use regex::Regex;
use std::sync::OnceLock;

/// Functions the engine does not implement.
const UNSUPPORTED_FUNCTIONS: &[&str] = &[
    "tobooleanlist",
    "tobooleanornull",
    "tofloatlist",
    "tofloatornull",
    "tointegerlist",
    "tointegerornull",
    "tostringlist",
    "isempty",
    "elementid",
    "nullif",
    "percentilecont",
    "percentiledisc",
    "stdev",
    "stdevp",
    "isnan",
    "cot",
    "degrees",
    "haversin",
    "radians",
    "normalize",
    "time",
    "shortestpath",
    "allshortestpaths",
];

macro_rules! static_re {
    ($pattern:literal) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pattern).expect("the compatibility pattern is valid"))
    }};
}

/// Collect every compatibility issue in the query. `tree` is the
/// whole-query parse when one exists; `None` during fallback parsing.
pub(crate) fn find_compatibility_issues(text: &str, tree: Option<&SyntaxTree>) -> Vec<String> {
    let stripped = strip_string_literals(text);
    let mut issues = Vec::new();

    if stripped.contains(":!") {
        issues.push("NOT label expressions (:!Label) are not supported".to_string());
    }

    if static_re!(r"(?i)\bSHORTEST\b").is_match(&stripped) {
        issues.push("SHORTEST keyword is not supported; use Memgraph path syntax".to_string());
    }

    if static_re!(r"(?i)\bCOUNT\s*\{").is_match(&stripped) {
        issues.push("COUNT subqueries are not supported".to_string());
    }

    if static_re!(r"(?i)\bCOLLECT\s*\{").is_match(&stripped) {
        issues.push("COLLECT subqueries are not supported".to_string());
    }

    if static_re!(r"(?i)\bIS\s*::").is_match(&stripped) {
        issues.push("Type predicate 'IS ::' is not supported".to_string());
    }

    if static_re!(r"(?i)\b0o[0-7]+\b").is_match(&stripped) {
        issues.push("Octal integer literals (0o...) are not supported".to_string());
    }

    if static_re!(r"(?i)\b(NaN|Inf|Infinity)\b").is_match(&stripped) {
        issues.push("NaN/Inf/Infinity float literals are not supported".to_string());
    }

    if static_re!(r"(\]|-)\s*\{\s*\d").is_match(&stripped) {
        issues.push("Fixed-length patterns using '{n}' are not supported".to_string());
    }

    if case_when_has_multiple_values(&stripped) {
        issues.push("CASE WHEN with multiple values (comma-separated) is not supported".to_string());
    }

    if has_inline_property_map(&stripped) {
        issues.push(
            "Inline property maps in MATCH patterns are not supported; filter with a WHERE clause instead"
                .to_string(),
        );
    }

    let Some(tree) = tree else {
        return issues;
    };

    for invocation in tree.cypher().function_invocations() {
        let (function_name, args_text) = split_function_invocation(&invocation.text());
        if UNSUPPORTED_FUNCTIONS.contains(&function_name.as_str()) {
            issues.push(format!("Function '{function_name}' is not supported"));
            continue;
        }
        if function_name == "exists" {
            if !looks_like_pattern_expression(&args_text) {
                issues.push("exists(n.property) is not supported; use IS NOT NULL".to_string());
            }
            continue;
        }
        if looks_like_pattern_expression(&args_text) {
            issues
                .push("Patterns in expressions are not supported (except EXISTS(pattern))".to_string());
        }
    }
    issues
}

/// Detect `CASE .. WHEN v1, v2 THEN ..`: a comma at top-level nesting depth
/// inside a `WHEN` span marks a multi-value arm.
fn case_when_has_multiple_values(stripped: &str) -> bool {
    let bytes = stripped.as_bytes();
    let mut i = 0usize;
    let mut depth_paren = 0usize;
    let mut depth_bracket = 0usize;
    let mut depth_brace = 0usize;
    let mut in_when = false;
    let mut comma_in_when = false;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth_paren += 1,
            b')' => depth_paren = depth_paren.saturating_sub(1),
            b'[' => depth_bracket += 1,
            b']' => depth_bracket = depth_bracket.saturating_sub(1),
            b'{' => depth_brace += 1,
            b'}' => depth_brace = depth_brace.saturating_sub(1),
            _ => {}
        }

        if depth_paren == 0 && depth_bracket == 0 && depth_brace == 0 {
            if bytes[i..].len() >= 4 && bytes[i..i + 4].eq_ignore_ascii_case(b"WHEN") {
                in_when = true;
                comma_in_when = false;
                i += 4;
                continue;
            }
            if in_when && bytes[i..].len() >= 4 && bytes[i..i + 4].eq_ignore_ascii_case(b"THEN") {
                if comma_in_when {
                    return true;
                }
                in_when = false;
                i += 4;
                continue;
            }
            if in_when && bytes[i] == b',' {
                comma_in_when = true;
            }
        }
        i += 1;
    }
    false
}

/// Detect an inline property map inside a labeled node pattern:
/// `(v:Label {..})`. The scan runs on stripped text, so string contents
/// never confuse it; backticked labels are not recognized.
fn has_inline_property_map(stripped: &str) -> bool {
    let re = static_re!(
        r"^\s*(?:[A-Za-z_][A-Za-z0-9_]*)?\s*(?::\s*!?\s*[A-Za-z_][A-Za-z0-9_]*\s*)+\{"
    );
    let bytes = stripped.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'(' {
            if let Some(end) = match_balanced(stripped, i, b'(', b')') {
                if re.is_match(&stripped[i + 1..end]) {
                    return true;
                }
            }
        }
        i += 1;
    }
    false
}

/// Split `name(args)` into the lowercased dotted tail of the name and the
/// argument text.
fn split_function_invocation(text: &str) -> (String, String) {
    match text.find('(') {
        Some(index) => {
            let name = &text[..index];
            let args = if text.ends_with(')') {
                &text[index + 1..text.len() - 1]
            } else {
                &text[index + 1..]
            };
            let tail = name.rsplit('.').next().unwrap_or(name).trim();
            (tail.to_ascii_lowercase(), args.to_string())
        }
        None => (text.trim().to_ascii_lowercase(), String::new()),
    }
}
