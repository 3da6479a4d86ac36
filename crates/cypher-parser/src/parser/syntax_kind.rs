#![allow(bad_style)]

/// The kind of a node or token in the syntax tree.
///
/// Token kinds come first, keyword kinds second, composite node kinds last.
/// The enum is `repr(u16)` so it can round-trip through `rowan::SyntaxKind`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u16)]
pub enum SyntaxKind {
    #[doc(hidden)]
    TOMBSTONE,
    #[doc(hidden)]
    EOF,

    // tokens
    WHITESPACE,
    COMMENT,
    IDENT,
    ESCAPED_IDENT,
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    BANG,
    DOLLAR,
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    L_CURLY,
    R_CURLY,
    COLON,
    SEMICOLON,
    COMMA,
    DOT,
    DOT_DOT,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    CARET,
    EQ,
    NEQ,
    LT,
    GT,
    LTE,
    GTE,
    PIPE,
    REGEX_MATCH,

    // keywords (Cypher keywords are contextual `Name` tokens; the parser
    // re-kinds them when they appear in keyword position)
    MATCH_KW,
    OPTIONAL_KW,
    WHERE_KW,
    WITH_KW,
    UNWIND_KW,
    AS_KW,
    CALL_KW,
    YIELD_KW,
    CREATE_KW,
    MERGE_KW,
    ON_KW,
    SET_KW,
    DELETE_KW,
    DETACH_KW,
    REMOVE_KW,
    RETURN_KW,
    DISTINCT_KW,
    ORDER_KW,
    BY_KW,
    ASC_KW,
    DESC_KW,
    SKIP_KW,
    LIMIT_KW,
    AND_KW,
    OR_KW,
    XOR_KW,
    NOT_KW,
    IN_KW,
    STARTS_KW,
    ENDS_KW,
    CONTAINS_KW,
    IS_KW,
    NULL_KW,
    TRUE_KW,
    FALSE_KW,
    EXISTS_KW,
    COUNT_KW,
    COLLECT_KW,
    CASE_KW,
    WHEN_KW,
    THEN_KW,
    ELSE_KW,
    END_KW,

    // composite nodes
    CYPHER,
    SINGLE_QUERY,
    MATCH_CLAUSE,
    WHERE_CLAUSE,
    WITH_CLAUSE,
    UNWIND_CLAUSE,
    CALL_CLAUSE,
    YIELD_ITEMS,
    YIELD_ITEM,
    CREATE_CLAUSE,
    MERGE_CLAUSE,
    MERGE_ACTION,
    SET_CLAUSE,
    SET_ITEM,
    DELETE_CLAUSE,
    REMOVE_CLAUSE,
    REMOVE_ITEM,
    RETURN_CLAUSE,
    PROJECTION_ITEMS,
    PROJECTION_ITEM,
    ORDER_BY,
    SORT_ITEM,
    SKIP_SUB_CLAUSE,
    LIMIT_SUB_CLAUSE,
    PATTERN,
    PATTERN_PART,
    PATTERN_ELEMENT,
    PATTERN_ELEMENT_CHAIN,
    NODE_PATTERN,
    NODE_LABELS,
    NODE_LABEL,
    LABEL_NAME,
    RELATIONSHIP_PATTERN,
    RELATIONSHIP_DETAIL,
    RELATIONSHIP_TYPES,
    REL_TYPE_NAME,
    RANGE_LITERAL,
    PROPERTIES,
    VARIABLE,
    NAME,
    PARAMETER,
    FUNCTION_INVOCATION,
    FUNCTION_NAME,
    PROCEDURE_NAME,
    BINARY_EXPRESSION,
    NOT_EXPRESSION,
    UNARY_EXPRESSION,
    PROPERTY_EXPRESSION,
    INDEX_EXPRESSION,
    NULL_PREDICATE_EXPRESSION,
    PARENTHESIZED_EXPRESSION,
    LITERAL,
    LIST_LITERAL,
    MAP_LITERAL,
    MAP_ENTRY,
    LIST_COMPREHENSION,
    CASE_EXPRESSION,
    CASE_ALTERNATIVE,
    EXISTS_SUBQUERY,
    COUNT_SUBQUERY,
    COLLECT_SUBQUERY,
    CALL_SUBQUERY,
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Map a keyword, matched case-insensitively, to its kind.
    pub fn from_keyword(ident: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kw = match ident.to_ascii_uppercase().as_str() {
            "MATCH" => MATCH_KW,
            "OPTIONAL" => OPTIONAL_KW,
            "WHERE" => WHERE_KW,
            "WITH" => WITH_KW,
            "UNWIND" => UNWIND_KW,
            "AS" => AS_KW,
            "CALL" => CALL_KW,
            "YIELD" => YIELD_KW,
            "CREATE" => CREATE_KW,
            "MERGE" => MERGE_KW,
            "ON" => ON_KW,
            "SET" => SET_KW,
            "DELETE" => DELETE_KW,
            "DETACH" => DETACH_KW,
            "REMOVE" => REMOVE_KW,
            "RETURN" => RETURN_KW,
            "DISTINCT" => DISTINCT_KW,
            "ORDER" => ORDER_KW,
            "BY" => BY_KW,
            "ASC" | "ASCENDING" => ASC_KW,
            "DESC" | "DESCENDING" => DESC_KW,
            "SKIP" => SKIP_KW,
            "LIMIT" => LIMIT_KW,
            "AND" => AND_KW,
            "OR" => OR_KW,
            "XOR" => XOR_KW,
            "NOT" => NOT_KW,
            "IN" => IN_KW,
            "STARTS" => STARTS_KW,
            "ENDS" => ENDS_KW,
            "CONTAINS" => CONTAINS_KW,
            "IS" => IS_KW,
            "NULL" => NULL_KW,
            "TRUE" => TRUE_KW,
            "FALSE" => FALSE_KW,
            "EXISTS" => EXISTS_KW,
            "COUNT" => COUNT_KW,
            "COLLECT" => COLLECT_KW,
            "CASE" => CASE_KW,
            "WHEN" => WHEN_KW,
            "THEN" => THEN_KW,
            "ELSE" => ELSE_KW,
            "END" => END_KW,
            _ => return None,
        };
        Some(kw)
    }

    pub fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::MATCH_KW as u16) && (self as u16) <= (SyntaxKind::END_KW as u16)
    }
}

impl From<SyntaxKind> for u16 {
    fn from(kind: SyntaxKind) -> u16 {
        kind as u16
    }
}
