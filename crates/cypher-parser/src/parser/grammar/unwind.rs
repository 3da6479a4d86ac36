use crate::parser::grammar::expression;
use crate::parser::grammar::name;
use crate::Parser;
use crate::SyntaxKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Unwind
///
/// *Unwind*:
///     **UNWIND** Expression **AS** Variable
pub(crate) fn unwind_clause(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::UNWIND_CLAUSE);
    p.expect_keyword("UNWIND", SyntaxKind::UNWIND_KW);
    expression::expression(p);
    p.expect_keyword("AS", SyntaxKind::AS_KW);
    name::variable(p);
}

#[cfg(test)]
mod test {
    use crate::Parser;

    #[test]
    fn parses_unwind() {
        let tree = Parser::new("UNWIND ['a', 'b'] AS ns MATCH (p:Pod) RETURN p, ns").parse();
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
    }

    #[test]
    fn unwind_requires_an_alias() {
        let tree = Parser::new("UNWIND ['a', 'b'] RETURN 1").parse();
        assert!(!tree.errors().is_empty());
    }
}
