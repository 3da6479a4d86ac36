use crate::parser::grammar::function;
use crate::parser::grammar::name;
use crate::parser::grammar::pattern;
use crate::parser::grammar::subquery;
use crate::Parser;
use crate::SyntaxKind;
use crate::TokenKind;

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#Expression
///
/// Precedence, loosest first:
/// `OR` > `XOR` > `AND` > `NOT` > comparison > string/list/null predicate >
/// additive > multiplicative > power > unary sign > postfix (property,
/// index) > atom.
pub(crate) fn expression(p: &mut Parser) {
    if !p.enter_recursion() {
        return;
    }
    or_expression(p);
    p.exit_recursion();
}

fn or_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    xor_expression(p);
    if p.at_keyword("OR") {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        while p.at_keyword("OR") {
            p.bump(SyntaxKind::OR_KW);
            xor_expression(p);
        }
    }
}

fn xor_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    and_expression(p);
    if p.at_keyword("XOR") {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        while p.at_keyword("XOR") {
            p.bump(SyntaxKind::XOR_KW);
            and_expression(p);
        }
    }
}

fn and_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    not_expression(p);
    if p.at_keyword("AND") {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        while p.at_keyword("AND") {
            p.bump(SyntaxKind::AND_KW);
            not_expression(p);
        }
    }
}

fn not_expression(p: &mut Parser) {
    if p.at_keyword("NOT") {
        if !p.enter_recursion() {
            return;
        }
        let _g = p.start_node(SyntaxKind::NOT_EXPRESSION);
        p.bump(SyntaxKind::NOT_KW);
        not_expression(p);
        p.exit_recursion();
    } else {
        comparison_expression(p);
    }
}

fn comparison_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    predicate_expression(p);
    if at_comparison_operator(p) {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        while at_comparison_operator(p) {
            let kind = match p.peek() {
                Some(TokenKind::Eq) => SyntaxKind::EQ,
                Some(TokenKind::Neq) => SyntaxKind::NEQ,
                Some(TokenKind::Lt) => SyntaxKind::LT,
                Some(TokenKind::Gt) => SyntaxKind::GT,
                Some(TokenKind::Lte) => SyntaxKind::LTE,
                Some(TokenKind::Gte) => SyntaxKind::GTE,
                _ => unreachable!(),
            };
            p.bump(kind);
            predicate_expression(p);
        }
    }
}

fn at_comparison_operator(p: &mut Parser) -> bool {
    matches!(
        p.peek(),
        Some(
            TokenKind::Eq
                | TokenKind::Neq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Lte
                | TokenKind::Gte
        )
    )
}

/// String, list and null predicates: `IN`, `STARTS WITH`, `ENDS WITH`,
/// `CONTAINS`, `=~`, `IS NULL`, `IS NOT NULL`.
fn predicate_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    additive_expression(p);

    if p.at_keyword("IS") {
        let _g = checkpoint.wrap_node(SyntaxKind::NULL_PREDICATE_EXPRESSION);
        p.bump(SyntaxKind::IS_KW);
        if p.at_keyword("NOT") {
            p.bump(SyntaxKind::NOT_KW);
        }
        p.expect_keyword("NULL", SyntaxKind::NULL_KW);
    } else if p.at_keyword("IN") {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        p.bump(SyntaxKind::IN_KW);
        additive_expression(p);
    } else if p.at_keyword("STARTS") {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        p.bump(SyntaxKind::STARTS_KW);
        p.expect_keyword("WITH", SyntaxKind::WITH_KW);
        additive_expression(p);
    } else if p.at_keyword("ENDS") {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        p.bump(SyntaxKind::ENDS_KW);
        p.expect_keyword("WITH", SyntaxKind::WITH_KW);
        additive_expression(p);
    } else if p.at_keyword("CONTAINS") {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        p.bump(SyntaxKind::CONTAINS_KW);
        additive_expression(p);
    } else if p.at(TokenKind::RegexMatch) {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        p.bump(SyntaxKind::REGEX_MATCH);
        additive_expression(p);
    }
}

fn additive_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    multiplicative_expression(p);
    if matches!(p.peek(), Some(TokenKind::Plus | TokenKind::Minus)) {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        while matches!(p.peek(), Some(TokenKind::Plus | TokenKind::Minus)) {
            match p.peek() {
                Some(TokenKind::Plus) => p.bump(SyntaxKind::PLUS),
                _ => p.bump(SyntaxKind::MINUS),
            }
            multiplicative_expression(p);
        }
    }
}

fn multiplicative_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    power_expression(p);
    if matches!(
        p.peek(),
        Some(TokenKind::Star | TokenKind::Slash | TokenKind::Percent)
    ) {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        while matches!(
            p.peek(),
            Some(TokenKind::Star | TokenKind::Slash | TokenKind::Percent)
        ) {
            match p.peek() {
                Some(TokenKind::Star) => p.bump(SyntaxKind::STAR),
                Some(TokenKind::Slash) => p.bump(SyntaxKind::SLASH),
                _ => p.bump(SyntaxKind::PERCENT),
            }
            power_expression(p);
        }
    }
}

fn power_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    unary_expression(p);
    if p.at(TokenKind::Caret) {
        let _g = checkpoint.wrap_node(SyntaxKind::BINARY_EXPRESSION);
        while p.at(TokenKind::Caret) {
            p.bump(SyntaxKind::CARET);
            unary_expression(p);
        }
    }
}

fn unary_expression(p: &mut Parser) {
    if matches!(p.peek(), Some(TokenKind::Plus | TokenKind::Minus)) {
        if !p.enter_recursion() {
            return;
        }
        let _g = p.start_node(SyntaxKind::UNARY_EXPRESSION);
        match p.peek() {
            Some(TokenKind::Plus) => p.bump(SyntaxKind::PLUS),
            _ => p.bump(SyntaxKind::MINUS),
        }
        unary_expression(p);
        p.exit_recursion();
    } else {
        postfix_expression(p);
    }
}

/// Postfix property access and index/slice operators, left to right:
/// `a.b`, `a['b']`, `a[1..2]`.
fn postfix_expression(p: &mut Parser) {
    let checkpoint = p.checkpoint_node();
    atom(p);
    loop {
        if p.at(TokenKind::Dot) {
            let _g = checkpoint.clone().wrap_node(SyntaxKind::PROPERTY_EXPRESSION);
            p.bump(SyntaxKind::DOT);
            name::name(p);
        } else if p.at(TokenKind::LBracket) {
            let _g = checkpoint.clone().wrap_node(SyntaxKind::INDEX_EXPRESSION);
            p.bump(SyntaxKind::L_BRACK);
            if p.at(TokenKind::DotDot) {
                p.bump(SyntaxKind::DOT_DOT);
                if !p.at(TokenKind::RBracket) {
                    expression(p);
                }
            } else {
                expression(p);
                if p.at(TokenKind::DotDot) {
                    p.bump(SyntaxKind::DOT_DOT);
                    if !p.at(TokenKind::RBracket) {
                        expression(p);
                    }
                }
            }
            p.expect(TokenKind::RBracket, SyntaxKind::R_BRACK);
        } else {
            break;
        }
    }
}

fn atom(p: &mut Parser) {
    match p.peek() {
        Some(TokenKind::Int) => {
            let _g = p.start_node(SyntaxKind::LITERAL);
            p.bump(SyntaxKind::INT_NUMBER);
        }
        Some(TokenKind::Float) => {
            let _g = p.start_node(SyntaxKind::LITERAL);
            p.bump(SyntaxKind::FLOAT_NUMBER);
        }
        Some(TokenKind::StringValue) => {
            let _g = p.start_node(SyntaxKind::LITERAL);
            p.bump(SyntaxKind::STRING);
        }
        Some(TokenKind::Dollar) => parameter(p),
        Some(TokenKind::LBracket) => list_literal_or_comprehension(p),
        Some(TokenKind::LCurly) => map_literal(p),
        Some(TokenKind::LParen) => {
            if pattern::at_pattern_expression(p) {
                pattern::pattern_element(p);
            } else {
                let _g = p.start_node(SyntaxKind::PARENTHESIZED_EXPRESSION);
                p.bump(SyntaxKind::L_PAREN);
                expression(p);
                p.expect(TokenKind::RParen, SyntaxKind::R_PAREN);
            }
        }
        Some(TokenKind::Name | TokenKind::EscapedName) => name_atom(p),
        _ => p.err_and_pop("expected an expression"),
    }
}

fn name_atom(p: &mut Parser) {
    if p.at_keyword("TRUE") {
        let _g = p.start_node(SyntaxKind::LITERAL);
        p.bump(SyntaxKind::TRUE_KW);
    } else if p.at_keyword("FALSE") {
        let _g = p.start_node(SyntaxKind::LITERAL);
        p.bump(SyntaxKind::FALSE_KW);
    } else if p.at_keyword("NULL") {
        let _g = p.start_node(SyntaxKind::LITERAL);
        p.bump(SyntaxKind::NULL_KW);
    } else if p.at_keyword("CASE") {
        case_expression(p);
    } else if p.at_keyword("EXISTS") && p.peek_n(2) == Some(TokenKind::LCurly) {
        subquery::exists_subquery(p);
    } else if p.at_keyword("COUNT") && p.peek_n(2) == Some(TokenKind::LCurly) {
        subquery::count_subquery(p);
    } else if p.at_keyword("COLLECT") && p.peek_n(2) == Some(TokenKind::LCurly) {
        subquery::collect_subquery(p);
    } else if function::at_function_invocation(p) {
        function::function_invocation(p);
    } else {
        name::variable(p);
    }
}

/// *Parameter*:
///     **$** (SymbolicName | DecimalInteger)
pub(crate) fn parameter(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::PARAMETER);
    p.expect(TokenKind::Dollar, SyntaxKind::DOLLAR);
    match p.peek() {
        Some(TokenKind::Name) => p.bump(SyntaxKind::IDENT),
        Some(TokenKind::EscapedName) => p.bump(SyntaxKind::ESCAPED_IDENT),
        Some(TokenKind::Int) => p.bump(SyntaxKind::INT_NUMBER),
        _ => p.err("expected a parameter name"),
    }
}

/// `[1, 2]` or `[x IN xs WHERE pred | projection]`.
fn list_literal_or_comprehension(p: &mut Parser) {
    let is_comprehension = matches!(
        p.peek_n(2),
        Some(TokenKind::Name | TokenKind::EscapedName)
    ) && p.at_keyword_n(3, "IN");

    if is_comprehension {
        let _g = p.start_node(SyntaxKind::LIST_COMPREHENSION);
        p.bump(SyntaxKind::L_BRACK);
        name::variable(p);
        p.bump(SyntaxKind::IN_KW);
        expression(p);
        if p.at_keyword("WHERE") {
            p.bump(SyntaxKind::WHERE_KW);
            expression(p);
        }
        if p.at(TokenKind::Pipe) {
            p.bump(SyntaxKind::PIPE);
            expression(p);
        }
        p.expect(TokenKind::RBracket, SyntaxKind::R_BRACK);
    } else {
        let _g = p.start_node(SyntaxKind::LIST_LITERAL);
        p.bump(SyntaxKind::L_BRACK);
        if !p.at(TokenKind::RBracket) {
            expression(p);
            while p.at(TokenKind::Comma) {
                p.bump(SyntaxKind::COMMA);
                expression(p);
            }
        }
        p.expect(TokenKind::RBracket, SyntaxKind::R_BRACK);
    }
}

/// *MapLiteral*:
///     **{** (PropertyKeyName **:** Expression (**,** PropertyKeyName **:** Expression)*)? **}**
pub(crate) fn map_literal(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::MAP_LITERAL);
    p.expect(TokenKind::LCurly, SyntaxKind::L_CURLY);
    if !p.at(TokenKind::RCurly) {
        map_entry(p);
        while p.at(TokenKind::Comma) {
            p.bump(SyntaxKind::COMMA);
            map_entry(p);
        }
    }
    p.expect(TokenKind::RCurly, SyntaxKind::R_CURLY);
}

fn map_entry(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::MAP_ENTRY);
    name::name(p);
    p.expect(TokenKind::Colon, SyntaxKind::COLON);
    expression(p);
}

/// See: https://s3.amazonaws.com/artifacts.opencypher.org/M23/railroad/Cypher.html#CaseExpression
///
/// *CaseExpression*:
///     **CASE** Expression? CaseAlternative+ (**ELSE** Expression)? **END**
///
/// A `WHEN` arm accepts a comma-separated value list; multi-value arms are
/// a dialect extension the compatibility layer rejects.
fn case_expression(p: &mut Parser) {
    let _g = p.start_node(SyntaxKind::CASE_EXPRESSION);
    p.bump(SyntaxKind::CASE_KW);
    if !p.at_keyword("WHEN") && !p.at_keyword("ELSE") && !p.at_keyword("END") {
        expression(p);
    }
    while p.at_keyword("WHEN") {
        let _alt = p.start_node(SyntaxKind::CASE_ALTERNATIVE);
        p.bump(SyntaxKind::WHEN_KW);
        expression(p);
        while p.at(TokenKind::Comma) {
            p.bump(SyntaxKind::COMMA);
            expression(p);
        }
        p.expect_keyword("THEN", SyntaxKind::THEN_KW);
        expression(p);
    }
    if p.at_keyword("ELSE") {
        p.bump(SyntaxKind::ELSE_KW);
        expression(p);
    }
    p.expect_keyword("END", SyntaxKind::END_KW);
}
