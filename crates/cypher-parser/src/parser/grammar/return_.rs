use crate::parser::grammar::expression;
use crate::parser::grammar::name;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Return
///
/// *Return*:
///     **RETURN** ProjectionBody
pub(crate) fn return_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::RETURN_CLAUSE);
    p.expect_keyword("RETURN", SyntaxKind::RETURN_KW);
    projection_body(p);
}

/// *ProjectionBody*:
///     **DISTINCT**? ProjectionItems Order? Skip? Limit?
pub(crate) fn projection_body(p: &mut Parser) {
    if p.at_keyword("DISTINCT") {
        p.bump(SyntaxKind::DISTINCT_KW);
    }
    projection_items(p);
    if p.at_keyword("ORDER") {
        order_by(p);
    }
    if p.at_keyword("SKIP") {
        let _g = p.start_node(SyntaxKind::SKIP_SUB_CLAUSE);
        p.bump(SyntaxKind::SKIP_KW);
        expression::expression(p);
    }
    if p.at_keyword("LIMIT") {
        let _g = p.start_node(SyntaxKind::LIMIT_SUB_CLAUSE);
        p.bump(SyntaxKind::LIMIT_KW);
        expression::expression(p);
    }
}

/// *ProjectionItems*:
///     **\*** | ProjectionItem (**,** ProjectionItem)*
fn projection_items(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PROJECTION_ITEMS);
    if p.at(TokenKind::Star) {
        p.bump(SyntaxKind::STAR);
        return;
    }
    projection_item(p);
    while p.at(TokenKind::Comma) {
        p.bump(SyntaxKind::COMMA);
        projection_item(p);
    }
}

/// *ProjectionItem*:
///     Expression (**AS** Variable)?
fn projection_item(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PROJECTION_ITEM);
    expression::expression(p);
    if p.at_keyword("AS") {
        p.bump(SyntaxKind::AS_KW);
        name::variable(p);
    }
}

/// *Order*:
///     **ORDER** **BY** SortItem (**,** SortItem)*
fn order_by(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::ORDER_BY);
    p.bump(SyntaxKind::ORDER_KW);
    p.expect_keyword("BY", SyntaxKind::BY_KW);
    sort_item(p);
    while p.at(TokenKind::Comma) {
        p.bump(SyntaxKind::COMMA);
        sort_item(p);
    }
}

fn sort_item(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::SORT_ITEM);
    expression::expression(p);
    if p.at_keyword("ASC") || p.at_keyword("ASCENDING") {
        p.bump(SyntaxKind::ASC_KW);
    } else if p.at_keyword("DESC") || p.at_keyword("DESCENDING") {
        p.bump(SyntaxKind::DESC_KW);
    }
}

#[cfg(test)]
mod test {
    use crate::Parser;
    use crate::SyntaxKind;

    fn parse_ok(input: &str) -> crate::SyntaxTree {
        let tree = Parser::new(input).parse();
        assert!(tree.errors().is_empty(), "{input}: {:?}", tree.errors());
        tree
    }

    #[test]
    fn parses_return_star() {
        parse_ok("MATCH (n) RETURN *");
    }

    #[test]
    fn parses_distinct_projection_with_ordering() {
        let tree = parse_ok(
            "MATCH (p:Pod) RETURN DISTINCT p['metadata']['namespace'] AS namespace, \
             p['metadata']['name'] AS pod ORDER BY namespace, pod SKIP 5 LIMIT 10",
        );
        assert!(tree
            .syntax()
            .descendants()
            .any(|node| node.kind() == SyntaxKind::ORDER_BY));
        assert!(tree
            .syntax()
            .descendants()
            .any(|node| node.kind() == SyntaxKind::LIMIT_SUB_CLAUSE));
    }

    #[test]
    fn parses_sort_direction() {
        parse_ok("MATCH (p:Pod) RETURN p ORDER BY p.name DESC");
        parse_ok("MATCH (p:Pod) RETURN p ORDER BY p.name ASCENDING");
    }
}
