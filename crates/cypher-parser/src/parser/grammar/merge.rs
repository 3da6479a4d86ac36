use crate::parser::grammar::pattern;
use crate::parser::grammar::set;
use crate::Parser;
use crate::SyntaxKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Merge
///
/// *Merge*:
///     **MERGE** PatternPart MergeAction*
pub(crate) fn merge_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::MERGE_CLAUSE);
    p.expect_keyword("MERGE", SyntaxKind::MERGE_KW);
    pattern::pattern_part(p);
    while p.at_keyword("ON") {
        merge_action(p);
    }
}

/// *MergeAction*:
///     **ON** (**MATCH** | **CREATE**) Set
fn merge_action(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::MERGE_ACTION);
    p.expect_keyword("ON", SyntaxKind::ON_KW);
    if p.at_keyword("MATCH") {
        p.bump(SyntaxKind::MATCH_KW);
    } else {
        p.expect_keyword("CREATE", SyntaxKind::CREATE_KW);
    }
    set::set_clause(p);
}

#[cfg(test)]
mod test {
    use crate::Parser;
    use crate::SyntaxKind;

    #[test]
    fn parses_merge_with_actions() {
        let tree = Parser::new(
            "MERGE (p:Pod {name: 'web-0'}) ON CREATE SET p.created = true ON MATCH SET p.seen = true",
        )
        .parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let actions = tree
            .syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::MERGE_ACTION)
            .count();
        assert_eq!(actions, 2);
    }
}
