use crate::parser::grammar::expression;
use crate::parser::grammar::name;
use crate::parser::grammar::pattern;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Set
///
/// *Set*:
///     **SET** SetItem (**,** SetItem)*
pub(crate) fn set_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::SET_CLAUSE);
    p.expect_keyword("SET", SyntaxKind::SET_KW);
    set_item(p);
    while p.at(TokenKind::Comma) {
        p.bump(SyntaxKind::COMMA);
        set_item(p);
    }
}

/// *SetItem*:
///     Variable NodeLabels
///     Variable **+=** Expression
///     PropertyExpression **=** Expression
///
/// The property form parses as a single comparison expression; the tree
/// keeps the `=` token inline.
fn set_item(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::SET_ITEM);
    if name::at_name(p) && p.peek_n(2) == Some(TokenKind::Colon) {
        name::variable(p);
        pattern::node_labels(p);
    } else if name::at_name(p)
        && p.peek_n(2) == Some(TokenKind::Plus)
        && p.peek_n(3) == Some(TokenKind::Eq)
    {
        name::variable(p);
        p.bump(SyntaxKind::PLUS);
        p.bump(SyntaxKind::EQ);
        expression::expression(p);
    } else {
        expression::expression(p);
    }
}
