use crate::parser::grammar::expression;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Delete
///
/// *Delete*:
///     **DETACH**? **DELETE** Expression (**,** Expression)*
pub(crate) fn delete_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::DELETE_CLAUSE);
    if p.at_keyword("DETACH") {
        p.bump(SyntaxKind::DETACH_KW);
    }
    p.expect_keyword("DELETE", SyntaxKind::DELETE_KW);
    expression::expression(p);
    while p.at(TokenKind::Comma) {
        p.bump(SyntaxKind::COMMA);
        expression::expression(p);
    }
}

#[cfg(test)]
mod test {
    use crate::Parser;

    #[test]
    fn parses_delete() {
        let tree = Parser::new("MATCH (p:Pod) DELETE p").parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
    }

    #[test]
    fn parses_detach_delete() {
        let tree = Parser::new("MATCH (p:Pod) DETACH DELETE p").parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
    }
}
