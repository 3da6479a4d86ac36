use crate::parser::grammar::expression;
use crate::parser::grammar::name;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Pattern
///
/// *Pattern*:
///     PatternPart (**,** PatternPart)*
pub(crate) fn pattern(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PATTERN);
    pattern_part(p);
    while p.at(TokenKind::Comma) {
        p.bump(SyntaxKind::COMMA);
        pattern_part(p);
    }
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#PatternPart
///
/// *PatternPart*:
///     (Variable **=**)? PatternElement
pub(crate) fn pattern_part(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PATTERN_PART);
    if matches!(p.peek(), Some(TokenKind::Name | TokenKind::EscapedName))
        && p.peek_n(2) == Some(TokenKind::Eq)
    {
        name::variable(p);
        p.bump(SyntaxKind::EQ);
    }
    pattern_element(p);
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#PatternElement
///
/// *PatternElement*:
///     NodePattern PatternElementChain*
///
/// Also used for pattern expressions: a pattern appearing in expression
/// position produces the same node kind.
pub(crate) fn pattern_element(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PATTERN_ELEMENT);
    node_pattern(p);
    while at_relationship_start(p) {
        pattern_element_chain(p);
    }
}

/// *PatternElementChain*:
///     RelationshipPattern NodePattern
pub(crate) fn pattern_element_chain(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PATTERN_ELEMENT_CHAIN);
    relationship_pattern(p);
    node_pattern(p);
}

fn at_relationship_start(p: &mut Parser) -> bool {
    p.at(TokenKind::Minus) || (p.at(TokenKind::Lt) && p.peek_n(2) == Some(TokenKind::Minus))
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#RelationshipPattern
///
/// *RelationshipPattern*:
///     **<**? **-** RelationshipDetail? **-** **>**?
pub(crate) fn relationship_pattern(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::RELATIONSHIP_PATTERN);
    if p.at(TokenKind::Lt) {
        p.bump(SyntaxKind::LT);
    }
    p.expect(TokenKind::Minus, SyntaxKind::MINUS);
    if p.at(TokenKind::LBracket) {
        relationship_detail(p);
    }
    p.expect(TokenKind::Minus, SyntaxKind::MINUS);
    if p.at(TokenKind::Gt) {
        p.bump(SyntaxKind::GT);
    }
}

/// *RelationshipDetail*:
///     **[** Variable? RelationshipTypes? RangeLiteral? Properties? **]**
pub(crate) fn relationship_detail(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::RELATIONSHIP_DETAIL);
    p.expect(TokenKind::LBracket, SyntaxKind::L_BRACK);
    if name::at_name(p) {
        name::variable(p);
    }
    if p.at(TokenKind::Colon) {
        relationship_types(p);
    }
    if p.at(TokenKind::Star) {
        range_literal(p);
    }
    if p.at(TokenKind::LCurly) || p.at(TokenKind::Dollar) {
        properties(p);
    }
    p.expect(TokenKind::RBracket, SyntaxKind::R_BRACK);
}

/// *RelationshipTypes*:
///     **:** RelTypeName (**|** **:**? RelTypeName)*
pub(crate) fn relationship_types(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::RELATIONSHIP_TYPES);
    p.expect(TokenKind::Colon, SyntaxKind::COLON);
    name::rel_type_name(p);
    while p.at(TokenKind::Pipe) {
        p.bump(SyntaxKind::PIPE);
        if p.at(TokenKind::Colon) {
            p.bump(SyntaxKind::COLON);
        }
        name::rel_type_name(p);
    }
}

/// *RangeLiteral*:
///     `*` IntegerLiteral? (`..` IntegerLiteral?)?
pub(crate) fn range_literal(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::RANGE_LITERAL);
    p.expect(TokenKind::Star, SyntaxKind::STAR);
    if p.at(TokenKind::Int) {
        p.bump(SyntaxKind::INT_NUMBER);
    }
    if p.at(TokenKind::DotDot) {
        p.bump(SyntaxKind::DOT_DOT);
        if p.at(TokenKind::Int) {
            p.bump(SyntaxKind::INT_NUMBER);
        }
    }
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#NodePattern
///
/// *NodePattern*:
///     **(** Variable? NodeLabels? Properties? **)**
pub(crate) fn node_pattern(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::NODE_PATTERN);
    p.expect(TokenKind::LParen, SyntaxKind::L_PAREN);
    if name::at_name(p) {
        name::variable(p);
    }
    if p.at(TokenKind::Colon) {
        node_labels(p);
    }
    if p.at(TokenKind::LCurly) || p.at(TokenKind::Dollar) {
        properties(p);
    }
    p.expect(TokenKind::RParen, SyntaxKind::R_PAREN);
}

/// *NodeLabels*:
///     (**:** **!**? LabelName)+
///
/// Label negation (`:!Label`) is not openCypher but is accepted here; the
/// compatibility layer rejects it with a better message than a parse error.
pub(crate) fn node_labels(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::NODE_LABELS);
    while p.at(TokenKind::Colon) {
        let _label = p.start_node(SyntaxKind::NODE_LABEL);
        p.bump(SyntaxKind::COLON);
        if p.at(TokenKind::Bang) {
            p.bump(SyntaxKind::BANG);
        }
        name::label_name(p);
    }
}

/// *Properties*:
///     MapLiteral | Parameter
pub(crate) fn properties(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PROPERTIES);
    if p.at(TokenKind::LCurly) {
        expression::map_literal(p);
    } else {
        expression::parameter(p);
    }
}

/// Check whether the upcoming tokens are a pattern in expression position:
/// a node pattern followed by a relationship. The scan is bounded; anything
/// that does not settle within the bound is treated as a plain
/// parenthesized expression.
pub(crate) fn at_pattern_expression(p: &mut Parser) -> bool {
    if !p.at(TokenKind::LParen) {
        return false;
    }

    // Walk the tokens of the would-be node pattern.
    let mut n = 2;
    loop {
        match p.peek_n(n) {
            Some(TokenKind::RParen) => break,
            Some(
                TokenKind::Name | TokenKind::EscapedName | TokenKind::Colon | TokenKind::Bang,
            ) => n += 1,
            Some(TokenKind::LCurly) => {
                let mut depth = 1usize;
                n += 1;
                while depth > 0 {
                    match p.peek_n(n) {
                        Some(TokenKind::LCurly) => depth += 1,
                        Some(TokenKind::RCurly) => depth -= 1,
                        Some(TokenKind::Eof) | None => return false,
                        _ => {}
                    }
                    n += 1;
                    if n > 256 {
                        return false;
                    }
                }
            }
            _ => return false,
        }
        if n > 256 {
            return false;
        }
    }

    // A relationship must follow the closing paren.
    matches!(
        (p.peek_n(n + 1), p.peek_n(n + 2)),
        (
            Some(TokenKind::Minus),
            Some(TokenKind::LBracket | TokenKind::Minus)
        ) | (Some(TokenKind::Lt), Some(TokenKind::Minus))
    )
}

#[cfg(test)]
mod test {
    use crate::Parser;
    use crate::SyntaxKind;

    fn count_kind(input: &str, kind: SyntaxKind) -> usize {
        let tree = Parser::new(input).parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        tree.syntax()
            .descendants()
            .filter(|node| node.kind() == kind)
            .count()
    }

    #[test]
    fn parses_a_chained_pattern() {
        let input = "MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress)-[:DefinesBackend]->(b:IngressServiceBackend) RETURN b";
        assert_eq!(count_kind(input, SyntaxKind::NODE_PATTERN), 3);
        assert_eq!(count_kind(input, SyntaxKind::PATTERN_ELEMENT_CHAIN), 2);
    }

    #[test]
    fn parses_type_alternation_and_range() {
        let input = "MATCH (a:Pod)-[r:Manages|Owns*1..3]->(b) RETURN r";
        assert_eq!(count_kind(input, SyntaxKind::REL_TYPE_NAME), 2);
        assert_eq!(count_kind(input, SyntaxKind::RANGE_LITERAL), 1);
    }

    #[test]
    fn parses_undirected_and_reverse_arrows() {
        let input = "MATCH (a)--(b)<-[:Manages]-(c) RETURN a";
        assert_eq!(count_kind(input, SyntaxKind::PATTERN_ELEMENT_CHAIN), 2);
    }

    #[test]
    fn parses_named_pattern_parts() {
        let input = "MATCH route = (h:Host)-[:IsClaimedBy]->(i:Ingress) RETURN route";
        assert_eq!(count_kind(input, SyntaxKind::PATTERN_PART), 1);
    }

    #[test]
    fn parses_inline_properties() {
        let input = "MATCH (p:Pod {metadata: {name: 'x'}}) RETURN p";
        assert_eq!(count_kind(input, SyntaxKind::PROPERTIES), 1);
        assert_eq!(count_kind(input, SyntaxKind::MAP_LITERAL), 2);
    }

    #[test]
    fn parses_negated_labels() {
        let input = "MATCH (p:!Pod) RETURN p";
        assert_eq!(count_kind(input, SyntaxKind::NODE_LABEL), 1);
    }

    #[test]
    fn parses_backticked_names() {
        let input = "MATCH (`my var`:`My Label`)-[:`Links To`]->(b) RETURN b";
        assert_eq!(count_kind(input, SyntaxKind::ESCAPED_IDENT), 3);
    }
}
