use crate::parser::grammar::expression;
use crate::parser::grammar::name;
use crate::parser::grammar::pattern;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Remove
///
/// *Remove*:
///     **REMOVE** RemoveItem (**,** RemoveItem)*
pub(crate) fn remove_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::REMOVE_CLAUSE);
    p.expect_keyword("REMOVE", SyntaxKind::REMOVE_KW);
    remove_item(p);
    while p.at(TokenKind::Comma) {
        p.bump(SyntaxKind::COMMA);
        remove_item(p);
    }
}

/// *RemoveItem*:
///     Variable NodeLabels | PropertyExpression
fn remove_item(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::REMOVE_ITEM);
    if name::at_name(p) && p.peek_n(2) == Some(TokenKind::Colon) {
        name::variable(p);
        pattern::node_labels(p);
    } else {
        expression::expression(p);
    }
}
