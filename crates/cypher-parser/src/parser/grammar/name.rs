use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#SymbolicName
///
/// *SymbolicName*:
///     UnescapedSymbolicName | EscapedSymbolicName
pub(crate) fn name(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::NAME);
    name_token(p);
}

/// A variable binding, e.g. `p` in `(p:Pod)`.
pub(crate) fn variable(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::VARIABLE);
    name_token(p);
}

/// A node label, e.g. `Pod` in `(p:Pod)`.
pub(crate) fn label_name(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::LABEL_NAME);
    name_token(p);
}

/// A relationship type, e.g. `BelongsTo` in `[:BelongsTo]`.
pub(crate) fn rel_type_name(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::REL_TYPE_NAME);
    name_token(p);
}

pub(crate) fn name_token(p: &mut Parser) {
    match p.peek() {
        Some(TokenKind::Name) => p.bump(SyntaxKind::IDENT),
        Some(TokenKind::EscapedName) => p.bump(SyntaxKind::ESCAPED_IDENT),
        _ => p.err("expected a name"),
    }
}

/// Check whether the next token can start a name.
pub(crate) fn at_name(p: &mut Parser) -> bool {
    matches!(p.peek(), Some(TokenKind::Name | TokenKind::EscapedName))
}
