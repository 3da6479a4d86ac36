use crate::parser::grammar::match_;
use crate::parser::grammar::return_;
use crate::Parser;
use crate::SyntaxKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#With
///
/// *With*:
///     **WITH** ProjectionBody Where?
pub(crate) fn with_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::WITH_CLAUSE);
    p.expect_keyword("WITH", SyntaxKind::WITH_KW);
    return_::projection_body(p);
    if p.at_keyword("WHERE") {
        match_::where_clause(p);
    }
}

#[cfg(test)]
mod test {
    use crate::Parser;
    use crate::SyntaxKind;

    #[test]
    fn parses_chained_with_clauses() {
        let tree =
            Parser::new("MATCH (h:Host)-[:IsClaimedBy]->(i:Ingress) WITH h, i WITH h RETURN h")
                .parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let withs = tree
            .syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::WITH_CLAUSE)
            .count();
        assert_eq!(withs, 2);
    }

    #[test]
    fn parses_with_where() {
        let tree = Parser::new(
            "MATCH (p:Pod) WITH p, count(p) AS total WHERE total > 1 RETURN p",
        )
        .parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
    }
}
