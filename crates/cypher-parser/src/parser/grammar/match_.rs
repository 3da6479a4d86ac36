use crate::parser::grammar::expression;
use crate::parser::grammar::pattern;
use crate::Parser;
use crate::SyntaxKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Match
///
/// *Match*:
///     **OPTIONAL**? **MATCH** Pattern Where?
pub(crate) fn match_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::MATCH_CLAUSE);
    if p.at_keyword("OPTIONAL") {
        p.bump(SyntaxKind::OPTIONAL_KW);
    }
    p.expect_keyword("MATCH", SyntaxKind::MATCH_KW);
    pattern::pattern(p);
    if p.at_keyword("WHERE") {
        where_clause(p);
    }
}

/// *Where*:
///     **WHERE** Expression
pub(crate) fn where_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::WHERE_CLAUSE);
    p.expect_keyword("WHERE", SyntaxKind::WHERE_KW);
    expression::expression(p);
}
