//! Typed accessors over the concrete syntax tree.
//!
//! The wrappers here cover the node kinds a consumer of parsed queries
//! needs to inspect: patterns and their parts, names, and function
//! invocations. Each wrapper is a thin view over a [`SyntaxNode`]; casting
//! checks the node kind and accessors walk children lazily.
//!
//! ## Example
//! ```rust
//! use cypher_parser::cst::CstNode;
//! use cypher_parser::{cst, Parser};
//!
//! let tree = Parser::new("MATCH (p:Pod)-[:BelongsTo]->(ns:Namespace) RETURN p").parse();
//! assert!(tree.errors().is_empty());
//!
//! let element = tree
//!     .syntax()
//!     .descendants()
//!     .find_map(cst::PatternElement::cast)
//!     .unwrap();
//! let node = element.node_pattern().unwrap();
//! assert_eq!(node.variable().unwrap().text(), "p");
//! ```

use crate::SyntaxKind;
use crate::SyntaxNode;
use crate::SyntaxToken;

/// A typed view over a [`SyntaxNode`].
pub trait CstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(syntax: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! cst_node {
    ($(#[$attr:meta])* $name:ident, $kind:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub(crate) syntax: SyntaxNode,
        }

        impl CstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }
            fn cast(syntax: SyntaxNode) -> Option<Self> {
                if Self::can_cast(syntax.kind()) {
                    Some(Self { syntax })
                } else {
                    None
                }
            }
            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

cst_node!(
    /// The root node of a parsed query.
    Cypher,
    CYPHER
);
cst_node!(
    /// `(p:Pod)-[:BelongsTo]->(ns:Namespace)` — a node pattern followed by
    /// relationship chains.
    PatternElement,
    PATTERN_ELEMENT
);
cst_node!(
    /// One `-[..]->(..)` link of a pattern element.
    PatternElementChain,
    PATTERN_ELEMENT_CHAIN
);
cst_node!(
    /// `(p:Pod {phase: 'Running'})`
    NodePattern,
    NODE_PATTERN
);
cst_node!(
    /// The label set of a node pattern, `:Pod:Workload`.
    NodeLabels,
    NODE_LABELS
);
cst_node!(LabelName, LABEL_NAME);
cst_node!(
    /// `<-[r:Manages*1..2 {k: 'v'}]-`
    RelationshipPattern,
    RELATIONSHIP_PATTERN
);
cst_node!(
    /// The bracketed part of a relationship pattern.
    RelationshipDetail,
    RELATIONSHIP_DETAIL
);
cst_node!(
    /// The type alternation of a relationship, `:Manages|Owns`.
    RelationshipTypes,
    RELATIONSHIP_TYPES
);
cst_node!(RelTypeName, REL_TYPE_NAME);
cst_node!(Variable, VARIABLE);
cst_node!(Name, NAME);
cst_node!(
    /// `count(n)`, `apoc.text.join(xs, '-')`
    FunctionInvocation,
    FUNCTION_INVOCATION
);
cst_node!(FunctionName, FUNCTION_NAME);

fn child<N: CstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: CstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

fn has_token(parent: &SyntaxNode, kind: SyntaxKind) -> bool {
    parent
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .any(|token| token.kind() == kind)
}

fn first_name_token(parent: &SyntaxNode) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| {
            matches!(
                token.kind(),
                SyntaxKind::IDENT | SyntaxKind::ESCAPED_IDENT
            )
        })
}

impl Cypher {
    /// All pattern elements anywhere in the query, in source order. This
    /// includes elements inside subqueries and pattern expressions.
    pub fn pattern_elements(&self) -> impl Iterator<Item = PatternElement> {
        self.syntax.descendants().filter_map(PatternElement::cast)
    }

    /// All node patterns anywhere in the query, in source order.
    pub fn node_patterns(&self) -> impl Iterator<Item = NodePattern> {
        self.syntax.descendants().filter_map(NodePattern::cast)
    }

    /// All function invocations anywhere in the query, in source order.
    pub fn function_invocations(&self) -> impl Iterator<Item = FunctionInvocation> {
        self.syntax
            .descendants()
            .filter_map(FunctionInvocation::cast)
    }
}

impl PatternElement {
    pub fn node_pattern(&self) -> Option<NodePattern> {
        child(&self.syntax)
    }

    pub fn chains(&self) -> impl Iterator<Item = PatternElementChain> {
        children(&self.syntax)
    }
}

impl PatternElementChain {
    pub fn relationship_pattern(&self) -> Option<RelationshipPattern> {
        child(&self.syntax)
    }

    pub fn node_pattern(&self) -> Option<NodePattern> {
        child(&self.syntax)
    }
}

impl NodePattern {
    pub fn variable(&self) -> Option<Variable> {
        child(&self.syntax)
    }

    pub fn labels(&self) -> Option<NodeLabels> {
        child(&self.syntax)
    }

    /// The pattern's text without the wrapping parentheses.
    pub fn inner_text(&self) -> String {
        strip_wrapping(&self.syntax.text().to_string(), '(', ')')
    }
}

impl NodeLabels {
    pub fn names(&self) -> impl Iterator<Item = LabelName> {
        self.syntax.descendants().filter_map(LabelName::cast)
    }
}

impl RelationshipPattern {
    pub fn detail(&self) -> Option<RelationshipDetail> {
        child(&self.syntax)
    }

    /// Whether the pattern has a `<` on its left side.
    pub fn has_left_arrow(&self) -> bool {
        has_token(&self.syntax, SyntaxKind::LT)
    }

    /// Whether the pattern has a `>` on its right side.
    pub fn has_right_arrow(&self) -> bool {
        has_token(&self.syntax, SyntaxKind::GT)
    }

    /// The detail's text without the wrapping brackets, or an empty string
    /// for arrow-only patterns like `-->`.
    pub fn detail_text(&self) -> String {
        match self.detail() {
            Some(detail) => strip_wrapping(&detail.syntax.text().to_string(), '[', ']'),
            None => String::new(),
        }
    }
}

impl RelationshipDetail {
    pub fn types(&self) -> Option<RelationshipTypes> {
        child(&self.syntax)
    }
}

impl RelationshipTypes {
    pub fn names(&self) -> impl Iterator<Item = RelTypeName> {
        children(&self.syntax)
    }
}

impl LabelName {
    pub fn text(&self) -> String {
        name_text(&self.syntax)
    }
}

impl RelTypeName {
    pub fn text(&self) -> String {
        name_text(&self.syntax)
    }
}

impl Variable {
    pub fn text(&self) -> String {
        name_text(&self.syntax)
    }
}

impl Name {
    pub fn text(&self) -> String {
        name_text(&self.syntax)
    }
}

impl FunctionInvocation {
    pub fn name(&self) -> Option<FunctionName> {
        child(&self.syntax)
    }

    /// The invocation's full text, `name(args)`.
    pub fn text(&self) -> String {
        self.syntax.text().to_string()
    }
}

/// The text of a name node, with backticks stripped from escaped names.
fn name_text(node: &SyntaxNode) -> String {
    match first_name_token(node) {
        Some(token) if token.kind() == SyntaxKind::ESCAPED_IDENT => {
            strip_wrapping(token.text(), '`', '`')
        }
        Some(token) => token.text().to_string(),
        None => String::new(),
    }
}

fn strip_wrapping(text: &str, left: char, right: char) -> String {
    let trimmed = text
        .strip_prefix(left)
        .and_then(|rest| rest.strip_suffix(right))
        .unwrap_or(text);
    trimmed.to_string()
}
