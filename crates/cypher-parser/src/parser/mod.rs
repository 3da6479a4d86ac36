mod language;
mod syntax_kind;
mod syntax_tree;

pub(crate) mod grammar;

use crate::lexer::Lexer;
use crate::Error;
use crate::LimitTracker;
use crate::Token;
use crate::TokenKind;
pub use language::CypherLanguage;
pub use language::SyntaxElement;
pub use language::SyntaxNode;
pub use language::SyntaxNodeChildren;
pub use language::SyntaxToken;
use std::cell::RefCell;
use std::rc::Rc;
pub use syntax_kind::SyntaxKind;
pub use syntax_tree::SyntaxTree;
pub(crate) use syntax_tree::SyntaxTreeBuilder;

/// Parse Cypher queries into a typed CST.
///
/// ## Example
/// ```rust
/// use cypher_parser::Parser;
///
/// let query = "
/// MATCH (p:Pod)-[:BelongsTo]->(ns:Namespace)
/// WHERE ns.name = 'default'
/// RETURN p
/// ";
/// // Create a new instance of a parser given a query above.
/// let parser = Parser::new(query);
/// // Parse the query, and return a SyntaxTree.
/// let tree = parser.parse();
/// // Check that are no errors. These are not part of the CST.
/// assert_eq!(0, tree.errors().len());
///
/// // Get the root node
/// let cypher = tree.cypher();
/// // ... continue
/// ```
#[derive(Debug)]
pub struct Parser<'input> {
    lexer: Lexer<'input>,
    /// Store one lookahead token so we don't need to reparse things as much.
    current_token: Option<Token<'input>>,
    /// The in-progress tree.
    builder: Rc<RefCell<SyntaxTreeBuilder>>,
    /// Ignored tokens that should be added to the tree.
    ignored: Vec<Token<'input>>,
    /// The list of syntax errors we've accumulated so far.
    errors: Vec<crate::Error>,
    /// The limit to apply to parsing recursion.
    recursion_limit: LimitTracker,
    /// Accept parsing errors?
    accept_errors: bool,
}

/// Sized well below the depth at which parsing nested Cypher expressions
/// overflows the stack in an unoptimized build.
const DEFAULT_RECURSION_LIMIT: usize = 500;

impl<'input> Parser<'input> {
    /// Create a new instance of a parser given an input string.
    pub fn new(input: &'input str) -> Self {
        Self {
            lexer: Lexer::new(input),
            current_token: None,
            builder: Rc::new(RefCell::new(SyntaxTreeBuilder::new())),
            ignored: vec![],
            errors: Vec::new(),
            recursion_limit: LimitTracker::new(DEFAULT_RECURSION_LIMIT),
            accept_errors: true,
        }
    }

    /// Configure the recursion limit to use while parsing.
    pub fn recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = LimitTracker::new(recursion_limit);
        self
    }

    /// Configure the limit on the number of tokens to parse. If an input
    /// query is too big, parsing will be aborted.
    ///
    /// By default, there is no limit.
    pub fn token_limit(mut self, token_limit: usize) -> Self {
        self.lexer = self.lexer.with_limit(token_limit);
        self
    }

    /// Parse the current tokens.
    pub fn parse(mut self) -> SyntaxTree {
        grammar::cypher(&mut self);

        let builder = Rc::try_unwrap(self.builder)
            .expect("More than one reference to builder left")
            .into_inner();
        builder.finish(self.errors, self.recursion_limit, self.lexer.limit_tracker)
    }

    /// Check if the current token is `kind`.
    pub(crate) fn at(&mut self, token: TokenKind) -> bool {
        self.peek().is_some_and(|kind| kind == token)
    }

    /// Check if the current token is a `Name` spelling `keyword`,
    /// case-insensitively.
    pub(crate) fn at_keyword(&mut self, keyword: &str) -> bool {
        self.at(TokenKind::Name)
            && self
                .peek_data()
                .is_some_and(|data| data.eq_ignore_ascii_case(keyword))
    }

    /// Check if token `n` is a `Name` spelling `keyword`, case-insensitively.
    pub(crate) fn at_keyword_n(&self, n: usize, keyword: &str) -> bool {
        self.peek_token_n(n).is_some_and(|token| {
            token.kind() == TokenKind::Name && token.data().eq_ignore_ascii_case(keyword)
        })
    }

    /// Consume a token and add it to the syntax tree. Queue any ignored
    /// tokens that follow.
    pub(crate) fn bump(&mut self, kind: SyntaxKind) {
        self.eat(kind);
        self.skip_ignored();
    }

    /// Consume and skip ignored tokens from the lexer.
    pub(crate) fn skip_ignored(&mut self) {
        while let Some(TokenKind::Comment | TokenKind::Whitespace) = self.peek() {
            let token = self.pop();
            self.ignored.push(token);
        }
    }

    /// Push skipped ignored tokens to the current node.
    pub(crate) fn push_ignored(&mut self) {
        let tokens = std::mem::take(&mut self.ignored);
        for token in tokens {
            let syntax_kind = match token.kind() {
                TokenKind::Comment => SyntaxKind::COMMENT,
                TokenKind::Whitespace => SyntaxKind::WHITESPACE,
                _ => unreachable!(),
            };
            self.push_token(syntax_kind, token);
        }
    }

    /// Get current token's data.
    pub(crate) fn current(&mut self) -> Option<&Token<'input>> {
        self.peek_token()
    }

    /// Consume a token from the lexer and add it to the syntax tree.
    fn eat(&mut self, kind: SyntaxKind) {
        self.push_ignored();
        if self.current().is_none() {
            return;
        }

        let token = self.pop();
        self.push_token(kind, token);
    }

    /// Create a parser limit error and push it into the error vector.
    ///
    /// Note: After a limit error is pushed, any further errors pushed
    /// are silently discarded.
    pub(crate) fn limit_err<S: Into<String>>(&mut self, message: S) {
        let Some(current) = self.current() else {
            return;
        };
        let err = Error::limit(message, current.index());
        self.push_err(err);
        self.accept_errors = false;
    }

    /// Create a parser error at the current location and push it into the
    /// error vector.
    pub(crate) fn err(&mut self, message: &str) {
        let Some(current) = self.current() else {
            return;
        };
        let err = if current.kind() == TokenKind::Eof {
            Error::eof(message, current.index())
        } else {
            Error::with_loc(message, current.data().to_string(), current.index())
        };
        self.push_err(err);
    }

    /// Create a parser error at the current location and eat the responsible
    /// token. The EOF token is never eaten so that callers looping until EOF
    /// terminate.
    pub(crate) fn err_and_pop(&mut self, message: &str) {
        self.push_ignored();
        let Some(current) = self.current() else {
            return;
        };
        if current.kind() == TokenKind::Eof {
            let err = Error::eof(message, current.index());
            self.push_err(err);
            return;
        }

        let current = self.pop();
        let err = Error::with_loc(message, current.data().to_string(), current.index());

        // Keep the error in the parse tree for position information.
        self.push_token(SyntaxKind::ERROR, current);
        self.push_err(err);
        self.skip_ignored();
    }

    /// Consume the next token if it is `kind` or emit an error otherwise.
    pub(crate) fn expect(&mut self, token: TokenKind, kind: SyntaxKind) {
        let Some(current) = self.current() else {
            return;
        };
        let is_eof = current.kind() == TokenKind::Eof;
        let data = current.data();
        let index = current.index();

        if self.at(token) {
            self.bump(kind);
            return;
        }

        let err = if is_eof {
            let message = format!("expected {kind:?}, got EOF");
            Error::eof(message, index)
        } else {
            let message = format!("expected {kind:?}, got {data}");
            Error::with_loc(message, data.to_string(), index)
        };

        self.push_err(err);
    }

    /// Consume the next token if it is a `Name` spelling `keyword` or emit
    /// an error otherwise.
    pub(crate) fn expect_keyword(&mut self, keyword: &str, kind: SyntaxKind) {
        if self.at_keyword(keyword) {
            self.bump(kind);
        } else {
            self.err(&format!("expected {keyword}"));
        }
    }

    /// Push an error to parser's error Vec.
    pub(crate) fn push_err(&mut self, err: crate::error::Error) {
        // If the parser has reached a limit, self.accept_errors will
        // be set to false so that we do not push any more errors.
        //
        // This is because the limit activation will result
        // in an early termination which will cause the parser to
        // report "errors" which aren't really errors and thus
        // must be ignored.
        if self.accept_errors {
            self.errors.push(err);
        }
    }

    /// Track one level of grammar recursion. Returns `false`, after pushing
    /// a limit error, when the recursion limit is exceeded.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        self.recursion_limit.consume();
        if self.recursion_limit.limited() {
            self.limit_err("parser recursion limit reached");
            false
        } else {
            true
        }
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_limit.release();
    }

    /// Gets the next token from the lexer.
    fn next_token(&mut self) -> Option<Token<'input>> {
        loop {
            let res = self.lexer.next()?;
            match res {
                Err(err) => {
                    if err.is_limit() {
                        self.accept_errors = false;
                    }
                    // Push any pending ignored tokens before adding the error
                    // token, so byte positions in the tree stay aligned.
                    self.push_ignored();
                    self.builder
                        .borrow_mut()
                        .token(SyntaxKind::ERROR, err.data());
                    self.errors.push(err);
                }
                Ok(token) => {
                    return Some(token);
                }
            }
        }
    }

    /// Consume a token from the lexer.
    pub(crate) fn pop(&mut self) -> Token<'input> {
        if let Some(token) = self.current_token.take() {
            return token;
        }

        self.next_token()
            .expect("Could not pop a token from the lexer")
    }

    /// Insert a token into the syntax tree.
    pub(crate) fn push_token(&mut self, kind: SyntaxKind, token: Token) {
        self.builder.borrow_mut().token(kind, token.data())
    }

    /// Start a node and make it current.
    ///
    /// This also creates a NodeGuard under the hood that will automatically
    /// close the node (via Drop) when the guard goes out of scope.
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) -> NodeGuard {
        self.push_ignored();

        self.builder.borrow_mut().start_node(kind);
        let guard = NodeGuard::new(self.builder.clone());
        self.skip_ignored();

        guard
    }

    /// Set a checkpoint for *maybe* wrapping the following parse tree in
    /// some other node.
    pub(crate) fn checkpoint_node(&mut self) -> Checkpoint {
        // We may start a new node here in the future, so let's process
        // our preceding trivia first.
        self.push_ignored();

        let checkpoint = self.builder.borrow().checkpoint();
        Checkpoint::new(self.builder.clone(), checkpoint)
    }

    /// Peek the next Token and return its TokenKind.
    pub(crate) fn peek(&mut self) -> Option<TokenKind> {
        self.peek_token().map(|token| token.kind())
    }

    /// Peek the next Token and return it.
    pub(crate) fn peek_token(&mut self) -> Option<&Token<'input>> {
        if self.current_token.is_none() {
            self.current_token = self.next_token();
        }
        self.current_token.as_ref()
    }

    /// Peek Token `n` and return it. Trivia tokens are not counted.
    pub(crate) fn peek_token_n(&self, n: usize) -> Option<Token<'input>> {
        self.current_token
            .iter()
            .cloned()
            .map(Result::Ok)
            .chain(self.lexer.clone())
            .filter_map(Result::ok)
            .filter(|token| !matches!(token.kind(), TokenKind::Whitespace | TokenKind::Comment))
            .nth(n - 1)
    }

    /// Peek Token `n` and return its TokenKind.
    pub(crate) fn peek_n(&self, n: usize) -> Option<TokenKind> {
        self.peek_token_n(n).map(|token| token.kind())
    }

    /// Peek next Token's `data` property.
    pub(crate) fn peek_data(&mut self) -> Option<&'input str> {
        self.peek_token().map(|token| token.data())
    }

    /// Peek token `n`'s `data` property.
    pub(crate) fn peek_data_n(&self, n: usize) -> Option<&'input str> {
        self.peek_token_n(n).map(|token| token.data())
    }
}

/// A wrapper around the SyntaxTreeBuilder used to self-close nodes.
///
/// When the NodeGuard goes out of scope, it automatically runs
/// `finish_node()` on the SyntaxTreeBuilder. This ensures that nodes are
/// not forgotten to be closed.
#[must_use]
pub(crate) struct NodeGuard {
    builder: Rc<RefCell<SyntaxTreeBuilder>>,
}

impl NodeGuard {
    fn new(builder: Rc<RefCell<SyntaxTreeBuilder>>) -> Self {
        Self { builder }
    }

    pub(crate) fn finish_node(self) {
        drop(self);
    }
}

impl Drop for NodeGuard {
    fn drop(&mut self) {
        self.builder.borrow_mut().finish_node();
    }
}

/// A rowan Checkpoint that can self-close the new wrapper node if required.
pub(crate) struct Checkpoint {
    builder: Rc<RefCell<SyntaxTreeBuilder>>,
    checkpoint: rowan::Checkpoint,
}

impl Clone for Checkpoint {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder.clone(),
            checkpoint: self.checkpoint,
        }
    }
}

impl Checkpoint {
    fn new(builder: Rc<RefCell<SyntaxTreeBuilder>>, checkpoint: rowan::Checkpoint) -> Self {
        Self {
            builder,
            checkpoint,
        }
    }

    /// Wrap the nodes that were parsed since setting this checkpoint in a
    /// new parent node of kind `kind`. Returns a NodeGuard that when
    /// dropped, finishes this new parent node. More children can be added
    /// to this new node in the mean time.
    pub(crate) fn wrap_node(self, kind: SyntaxKind) -> NodeGuard {
        self.builder.borrow_mut().wrap_node(self.checkpoint, kind);
        NodeGuard::new(self.builder)
    }
}
