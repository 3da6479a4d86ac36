use crate::parser::grammar::expression;
use crate::parser::grammar::match_;
use crate::parser::grammar::name;
use crate::parser::grammar::{single_query, Projection};
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#StandaloneCall
///
/// *Call*:
///     **CALL** **{** SingleQuery **}**
///     **CALL** ProcedureName (**(** Expression (**,** Expression)* **)**)? YieldItems?
pub(crate) fn call_clause(p: &mut Parser) {
    if p.peek_n(2) == Some(TokenKind::LCurly) {
        call_subquery(p);
        return;
    }

    let _g = p.start_node(SyntaxKind::CALL_CLAUSE);
    p.expect_keyword("CALL", SyntaxKind::CALL_KW);
    procedure_name(p);
    if p.at(TokenKind::LParen) {
        p.bump(SyntaxKind::L_PAREN);
        if !p.at(TokenKind::RParen) {
            expression::expression(p);
            while p.at(TokenKind::Comma) {
                p.bump(SyntaxKind::COMMA);
                expression::expression(p);
            }
        }
        p.expect(TokenKind::RParen, SyntaxKind::R_PAREN);
    }
    if p.at_keyword("YIELD") {
        yield_items(p);
    }
}

fn call_subquery(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::CALL_SUBQUERY);
    p.expect_keyword("CALL", SyntaxKind::CALL_KW);
    p.expect(TokenKind::LCurly, SyntaxKind::L_CURLY);
    single_query(p, Projection::Optional);
    p.expect(TokenKind::RCurly, SyntaxKind::R_CURLY);
}

/// *ProcedureName*:
///     SymbolicName (**.** SymbolicName)*
fn procedure_name(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PROCEDURE_NAME);
    name::name_token(p);
    while p.at(TokenKind::Dot) {
        p.bump(SyntaxKind::DOT);
        name::name_token(p);
    }
}

/// *YieldItems*:
///     **YIELD** YieldItem (**,** YieldItem)* Where?
fn yield_items(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::YIELD_ITEMS);
    p.expect_keyword("YIELD", SyntaxKind::YIELD_KW);
    yield_item(p);
    while p.at(TokenKind::Comma) {
        p.bump(SyntaxKind::COMMA);
        yield_item(p);
    }
    if p.at_keyword("WHERE") {
        match_::where_clause(p);
    }
}

fn yield_item(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::YIELD_ITEM);
    name::variable(p);
    if p.at_keyword("AS") {
        p.bump(SyntaxKind::AS_KW);
        name::variable(p);
    }
}
