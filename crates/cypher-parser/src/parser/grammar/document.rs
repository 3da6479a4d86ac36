use crate::parser::grammar::call;
use crate::parser::grammar::create;
use crate::parser::grammar::delete;
use crate::parser::grammar::match_;
use crate::parser::grammar::merge;
use crate::parser::grammar::remove;
use crate::parser::grammar::return_;
use crate::parser::grammar::set;
use crate::parser::grammar::unwind;
use crate::parser::grammar::with;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// Whether a single query has to terminate in a `RETURN` clause.
///
/// Top-level queries and `EXISTS { .. }` bodies require one (unless the
/// query writes); `COUNT { .. }` / `COLLECT { .. }` / `CALL { .. }` bodies
/// do not.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Projection {
    Required,
    Optional,
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Cypher
///
/// *Cypher*:
///     Statement **;**?
pub(crate) fn cypher(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::CYPHER);

    single_query(p, Projection::Required);

    if p.at(TokenKind::Semicolon) {
        p.bump(SyntaxKind::SEMICOLON);
    }
    while !p.at(TokenKind::Eof) {
        p.err_and_pop("expected end of input");
    }
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#SingleQuery
///
/// *SingleQuery*:
///     ReadingClause* UpdatingClause* Return?
///
/// Clauses are parsed in the order they appear; whether the query has to
/// end with a projection is decided by `projection`.
pub(crate) fn single_query(p: &mut Parser, projection: Projection) {
    let _g = p.start_node(SyntaxKind::SINGLE_QUERY);

    let mut clauses = 0;
    let mut has_return = false;
    let mut has_update = false;

    loop {
        if has_return
            || p.at(TokenKind::Eof)
            || p.at(TokenKind::RCurly)
            || p.at(TokenKind::Semicolon)
        {
            break;
        }

        if p.at_keyword("MATCH") || (p.at_keyword("OPTIONAL") && p.at_keyword_n(2, "MATCH")) {
            match_::match_clause(p);
        } else if p.at_keyword("UNWIND") {
            unwind::unwind_clause(p);
        } else if p.at_keyword("CALL") {
            call::call_clause(p);
        } else if p.at_keyword("CREATE") {
            create::create_clause(p);
            has_update = true;
        } else if p.at_keyword("MERGE") {
            merge::merge_clause(p);
            has_update = true;
        } else if p.at_keyword("SET") {
            set::set_clause(p);
            has_update = true;
        } else if p.at_keyword("DELETE") || (p.at_keyword("DETACH") && p.at_keyword_n(2, "DELETE"))
        {
            delete::delete_clause(p);
            has_update = true;
        } else if p.at_keyword("REMOVE") {
            remove::remove_clause(p);
            has_update = true;
        } else if p.at_keyword("WITH") {
            with::with_clause(p);
        } else if p.at_keyword("RETURN") {
            return_::return_clause(p);
            has_return = true;
        } else {
            p.err_and_pop("expected a Cypher clause");
            if p.at(TokenKind::Eof) {
                break;
            }
            continue;
        }
        clauses += 1;
    }

    if clauses == 0 {
        p.err("expected a Cypher clause");
    } else if projection == Projection::Required && !has_return && !has_update {
        p.err("expected the query to end with a RETURN clause");
    }
}
