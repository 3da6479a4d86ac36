use crate::parser::grammar::pattern;
use crate::Parser;
use crate::SyntaxKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Create
///
/// *Create*:
///     **CREATE** Pattern
pub(crate) fn create_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::CREATE_CLAUSE);
    p.expect_keyword("CREATE", SyntaxKind::CREATE_KW);
    pattern::pattern(p);
}

#[cfg(test)]
mod test {
    use crate::Parser;

    #[test]
    fn parses_create() {
        let tree =
            Parser::new("CREATE (p:Pod {name: 'web-0'})-[:BelongsTo]->(ns:Namespace)").parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
    }
}
