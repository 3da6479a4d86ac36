//! Literal-aware byte scanners.
//!
//! Every routine here walks raw bytes and ignores characters inside
//! single-quoted strings (`''` is an embedded quote, `\` escapes one
//! character) and inside backtick-quoted identifiers. Positions are always
//! byte offsets into the original text, so callers can slice it directly.

/// Replace every character inside single-quoted string literals, and the
/// quotes themselves, with a space. The result has the same byte length as
/// the input, so regex matches and index arithmetic against it stay valid
/// for the original text.
pub(crate) fn strip_string_literals(text: &str) -> String {
    let mut result = Vec::with_capacity(text.len());
    let mut in_string = false;
    let mut escape = false;
    for &byte in text.as_bytes() {
        if in_string {
            if escape {
                escape = false;
                result.push(b' ');
                continue;
            }
            if byte == b'\\' {
                escape = true;
                result.push(b' ');
                continue;
            }
            if byte == b'\'' {
                in_string = false;
            }
            result.push(b' ');
            continue;
        }
        if byte == b'\'' {
            in_string = true;
            result.push(b' ');
            continue;
        }
        result.push(byte);
    }
    String::from_utf8(result).expect("replacing bytes with ASCII spaces keeps UTF-8 valid")
}

/// The token test for "looks like a pattern expression". Deliberately
/// permissive: any substring that resembles a relationship arrow counts,
/// which can false-positive on arithmetic like `a-(b)` inside arguments.
/// The compatibility layer prefers erring toward the engine's limits.
pub(crate) fn looks_like_pattern_expression(text: &str) -> bool {
    ["-[:", "<-[", "]-", "->", "<-", ")-", "-("]
        .iter()
        .any(|token| text.contains(token))
}

/// True when neither side of `[start, end)` touches an identifier
/// continuation character.
pub(crate) fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let is_word = |b: u8| b == b'_' || b.is_ascii_alphanumeric();
    if start > 0 && is_word(bytes[start - 1]) {
        return false;
    }
    if end < bytes.len() && is_word(bytes[end]) {
        return false;
    }
    true
}

/// Starting at `start` (where `text[start] == open`), find the byte index
/// of the matching `close`, respecting string and backtick regions.
/// Returns `None` when the region is unbalanced.
pub(crate) fn match_balanced(text: &str, start: usize, open: u8, close: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = start;
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
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Byte indices of `keyword` occurrences at paren/bracket/brace depth zero,
/// outside string and backtick regions, gated on word boundaries. Matches
/// are case-insensitive.
fn top_level_keyword_indices(text: &str, keyword: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let target = keyword.as_bytes();
    let mut indices = Vec::new();
    let mut i = 0usize;
    let mut depth_paren = 0usize;
    let mut depth_bracket = 0usize;
    let mut depth_brace = 0usize;
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
        match byte {
            b'\'' => {
                in_string = true;
                i += 1;
                continue;
            }
            b'`' => {
                in_backtick = true;
                i += 1;
                continue;
            }
            b'(' => depth_paren += 1,
            b')' => depth_paren = depth_paren.saturating_sub(1),
            b'[' => depth_bracket += 1,
            b']' => depth_bracket = depth_bracket.saturating_sub(1),
            b'{' => depth_brace += 1,
            b'}' => depth_brace = depth_brace.saturating_sub(1),
            _ => {}
        }
        if depth_paren == 0
            && depth_bracket == 0
            && depth_brace == 0
            && bytes[i..].len() >= target.len()
            && bytes[i..i + target.len()].eq_ignore_ascii_case(target)
            && is_word_boundary(text, i, i + target.len())
        {
            indices.push(i);
            i += target.len();
            continue;
        }
        i += 1;
    }
    indices
}

/// Split `text` into the segments between top-level occurrences of
/// `keyword`. The keyword itself is dropped; the segments before the first
/// and after the last occurrence are included.
pub(crate) fn split_top_level<'a>(text: &'a str, keyword: &str) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut start = 0usize;
    for index in top_level_keyword_indices(text, keyword) {
        segments.push(&text[start..index]);
        start = index + keyword.len();
    }
    segments.push(&text[start..]);
    segments
}

/// Whether `text` contains a `RETURN` keyword at top-level nesting depth.
pub(crate) fn has_top_level_return(text: &str) -> bool {
    !top_level_keyword_indices(text, "RETURN").is_empty()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stripping_preserves_length_and_positions() {
        let text = "MATCH (h) WHERE h.name = 'lit''mus \\' x' RETURN h";
        let stripped = strip_string_literals(text);
        assert_eq!(stripped.len(), text.len());
        assert!(!stripped.contains("lit"));
        assert_eq!(&stripped[..25], &text[..25]);
    }

    #[test]
    fn stripping_handles_multibyte_contents() {
        let text = "RETURN 'héllo' AS x";
        let stripped = strip_string_literals(text);
        assert_eq!(stripped.len(), text.len());
        assert!(stripped.ends_with("AS x"));
    }

    #[test]
    fn balanced_matching_skips_strings() {
        let text = "{ a: '}' , b: { c: 1 } }";
        assert_eq!(match_balanced(text, 0, b'{', b'}'), Some(text.len() - 1));
    }

    #[test]
    fn unbalanced_regions_return_none() {
        assert_eq!(match_balanced("( ( )", 0, b'(', b')'), None);
    }

    #[test]
    fn split_ignores_nested_and_quoted_keywords() {
        let text = "MATCH (n) WHERE n.x = 'WITH' WITH n MATCH (m { with: 1 }) WITH m RETURN m";
        let segments = split_top_level(text, "WITH");
        assert_eq!(segments.len(), 3);
        assert!(segments[0].contains("'WITH'"));
        assert!(segments[1].contains("{ with: 1 }"));
        assert_eq!(segments[2].trim(), "m RETURN m");
    }

    #[test]
    fn keyword_matching_requires_word_boundaries() {
        assert!(top_level_keyword_indices("WITHER RETURN 1", "WITH").is_empty());
        assert!(has_top_level_return("MATCH (n) RETURN n"));
        assert!(!has_top_level_return("MATCH (n:Returned)"));
    }

    #[test]
    fn nested_returns_are_not_top_level() {
        assert!(!has_top_level_return("{ MATCH (n) RETURN n }"));
    }

    #[test]
    fn pattern_expression_token_test() {
        assert!(looks_like_pattern_expression("(s)-[:Manages]->(:EndpointSlice)"));
        assert!(looks_like_pattern_expression("(a)<-[r]-(b)"));
        assert!(!looks_like_pattern_expression("n.metadata"));
    }
}
