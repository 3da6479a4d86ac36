use std::fmt;

use rowan::GreenNodeBuilder;

use crate::cst::Cypher;
use crate::Error;
use crate::LimitTracker;
use crate::SyntaxElement;
use crate::SyntaxKind;
use crate::SyntaxNode;

use super::CypherLanguage;

/// A concrete syntax tree generated by the parser, alongside the errors the
/// parser accumulated.
pub struct SyntaxTree {
    pub(crate) ast: rowan::SyntaxNode<CypherLanguage>,
    pub(crate) errors: Vec<Error>,
    pub(crate) recursion_limit: LimitTracker,
    pub(crate) token_limit: LimitTracker,
}

impl SyntaxTree {
    /// Get a reference to the syntax tree's errors.
    pub fn errors(&self) -> &[Error] {
        self.errors.as_ref()
    }

    /// Get the high-water mark of the parser's recursion limit.
    pub fn recursion_limit(&self) -> LimitTracker {
        self.recursion_limit
    }

    /// Get the high-water mark of the lexer's token limit.
    pub fn token_limit(&self) -> LimitTracker {
        self.token_limit
    }

    /// Return the untyped root node.
    pub fn syntax(&self) -> SyntaxNode {
        self.ast.clone()
    }

    /// Return the root typed `Cypher` node.
    pub fn cypher(&self) -> Cypher {
        Cypher {
            syntax: self.ast.clone(),
        }
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn print(f: &mut fmt::Formatter<'_>, indent: usize, element: SyntaxElement) -> fmt::Result {
            let kind: SyntaxKind = element.kind();
            write!(f, "{:indent$}", "", indent = indent)?;
            match element {
                rowan::NodeOrToken::Node(node) => {
                    writeln!(f, "- {:?}@{:?}", kind, node.text_range())?;
                    for child in node.children_with_tokens() {
                        print(f, indent + 4, child)?;
                    }
                    Ok(())
                }

                rowan::NodeOrToken::Token(token) => {
                    writeln!(
                        f,
                        "- {:?}@{:?} {:?}",
                        kind,
                        token.text_range(),
                        token.text()
                    )
                }
            }
        }

        print(f, 0, self.ast.clone().into())?;
        for err in &self.errors {
            writeln!(f, "- {err:?}")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct SyntaxTreeBuilder {
    builder: GreenNodeBuilder<'static>,
}

impl SyntaxTreeBuilder {
    /// Create a new instance of `SyntaxTreeBuilder`.
    pub(crate) fn new() -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
        }
    }

    /// Start new node and make it current.
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(rowan::SyntaxKind(kind as u16));
    }

    /// Set a checkpoint that `wrap_node` can later retrofit a parent at.
    pub(crate) fn checkpoint(&self) -> rowan::Checkpoint {
        self.builder.checkpoint()
    }

    /// Wrap everything parsed since `checkpoint` in a new `kind` node and
    /// make it current.
    pub(crate) fn wrap_node(&mut self, checkpoint: rowan::Checkpoint, kind: SyntaxKind) {
        self.builder
            .start_node_at(checkpoint, rowan::SyntaxKind(kind as u16));
    }

    /// Finish current branch and restore previous branch as current.
    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Adds new token to the current branch.
    pub(crate) fn token(&mut self, kind: SyntaxKind, text: &str) {
        self.builder.token(rowan::SyntaxKind(kind as u16), text);
    }

    pub(crate) fn finish(
        self,
        errors: Vec<Error>,
        recursion_limit: LimitTracker,
        token_limit: LimitTracker,
    ) -> SyntaxTree {
        SyntaxTree {
            ast: rowan::SyntaxNode::new_root(self.builder.finish()),
            errors,
            recursion_limit,
            token_limit,
        }
    }
}
