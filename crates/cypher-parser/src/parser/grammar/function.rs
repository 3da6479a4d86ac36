use crate::parser::grammar::expression;
use crate::parser::grammar::name;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// Check whether the upcoming tokens form a function invocation: a dotted
/// name directly followed by `(`.
pub(crate) fn at_function_invocation(p: &mut Parser) -> bool {
    if !matches!(p.peek(), Some(TokenKind::Name | TokenKind::EscapedName)) {
        return false;
    }
    let mut n = 1;
    while p.peek_n(n + 1) == Some(TokenKind::Dot)
        && matches!(
            p.peek_n(n + 2),
            Some(TokenKind::Name | TokenKind::EscapedName)
        )
    {
        n += 2;
    }
    p.peek_n(n + 1) == Some(TokenKind::LParen)
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#FunctionInvocation
///
/// *FunctionInvocation*:
///     FunctionName **(** **DISTINCT**? (Expression (**,** Expression)*)? **)**
///
/// `COUNT(*)` is parsed through here as well, with `*` as the sole
/// argument.
pub(crate) fn function_invocation(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::FUNCTION_INVOCATION);
    function_name(p);
    p.expect(TokenKind::LParen, SyntaxKind::L_PAREN);
    if p.at_keyword("DISTINCT") {
        p.bump(SyntaxKind::DISTINCT_KW);
    }
    if p.at(TokenKind::Star) {
        p.bump(SyntaxKind::STAR);
    } else if !p.at(TokenKind::RParen) {
        expression::expression(p);
        while p.at(TokenKind::Comma) {
            p.bump(SyntaxKind::COMMA);
            expression::expression(p);
        }
    }
    p.expect(TokenKind::RParen, SyntaxKind::R_PAREN);
}

/// *FunctionName*:
///     SymbolicName (**.** SymbolicName)*
pub(crate) fn function_name(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::FUNCTION_NAME);
    name::name_token(p);
    while p.at(TokenKind::Dot) {
        p.bump(SyntaxKind::DOT);
        name::name_token(p);
    }
}

#[cfg(test)]
mod test {
    use crate::Parser;
    use crate::SyntaxKind;

    fn invocations(input: &str) -> Vec<String> {
        let tree = Parser::new(input).parse();
        assert!(tree.errors().is_empty(), "{input}: {:?}", tree.errors());
        tree.syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::FUNCTION_INVOCATION)
            .map(|node| node.text().to_string())
            .collect()
    }

    #[test]
    fn parses_function_invocations() {
        assert_eq!(invocations("MATCH (n) RETURN count(*) AS c"), vec!["count(*)"]);
        assert_eq!(
            invocations("MATCH (n) RETURN toUpper(n.name) AS up"),
            vec!["toUpper(n.name)"]
        );
    }

    #[test]
    fn parses_namespaced_invocations() {
        assert_eq!(
            invocations("MATCH (n) RETURN apoc.text.join(['a'], '-') AS joined"),
            vec!["apoc.text.join(['a'], '-')"]
        );
    }

    #[test]
    fn parses_nested_invocations() {
        assert_eq!(
            invocations("MATCH (n) RETURN size(collect(n.name)) AS total"),
            vec!["size(collect(n.name))", "collect(n.name)"]
        );
    }

    #[test]
    fn exists_with_a_property_argument_is_an_invocation() {
        assert_eq!(
            invocations("MATCH (n:Pod) WHERE exists(n.metadata) RETURN n"),
            vec!["exists(n.metadata)"]
        );
    }
}
