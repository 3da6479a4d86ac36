use crate::parser::grammar::{single_query, Projection};
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// *ExistsSubquery*:
///     **EXISTS** **{** SingleQuery **}**
///
/// The body is a full query and must end in a projection; pre-parse
/// normalization appends `RETURN 1` to bodies that lack one.
pub(crate) fn exists_subquery(p: &mut Parser) {
    subquery(
        p,
        SyntaxKind::EXISTS_SUBQUERY,
        SyntaxKind::EXISTS_KW,
        Projection::Required,
    );
}

/// *CountSubquery*:
///     **COUNT** **{** SingleQuery **}**
pub(crate) fn count_subquery(p: &mut Parser) {
    subquery(
        p,
        SyntaxKind::COUNT_SUBQUERY,
        SyntaxKind::COUNT_KW,
        Projection::Optional,
    );
}

/// *CollectSubquery*:
///     **COLLECT** **{** SingleQuery **}**
pub(crate) fn collect_subquery(p: &mut Parser) {
    subquery(
        p,
        SyntaxKind::COLLECT_SUBQUERY,
        SyntaxKind::COLLECT_KW,
        Projection::Optional,
    );
}

fn subquery(p: &mut Parser, kind: SyntaxKind, keyword: SyntaxKind, projection: Projection) {
    if !p.enter_recursion() {
        return;
    }
    let _g = p.start_node(kind);
    p.bump(keyword);
    p.expect(TokenKind::LCurly, SyntaxKind::L_CURLY);
    single_query(p, projection);
    p.expect(TokenKind::RCurly, SyntaxKind::R_CURLY);
    p.exit_recursion();
}
