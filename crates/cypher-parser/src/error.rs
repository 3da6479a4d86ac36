use std::fmt;

/// An `Error` type for operations performed in the lexer and the parser.
///
/// Errors get returned alongside the resulting syntax tree if either the
/// lexer or the parser encounter lexical or syntactical errors respectively.
/// Check for the tree's errors before iterating over its nodes:
///
/// ## Example
/// ```rust
/// use cypher_parser::Parser;
///
/// let input = "MATCH (n:Pod) RETURN n";
/// let tree = Parser::new(input).parse();
///
/// assert!(tree.errors().is_empty());
/// ```
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) data: String,
    pub(crate) index: usize,
    pub(crate) is_limit: bool,
}

impl Error {
    /// Create a new instance of `Error`.
    pub fn new<S: Into<String>>(message: S, data: String) -> Self {
        Self {
            message: message.into(),
            data,
            index: 0,
            is_limit: false,
        }
    }

    /// Create a new instance of `Error` at a byte offset of the input.
    pub fn with_loc<S: Into<String>>(message: S, data: String, index: usize) -> Self {
        Self {
            message: message.into(),
            data,
            index,
            is_limit: false,
        }
    }

    /// Create a new instance of `Error` reported at the end of the input.
    pub fn eof<S: Into<String>>(message: S, index: usize) -> Self {
        Self {
            message: message.into(),
            data: "EOF".to_string(),
            index,
            is_limit: false,
        }
    }

    /// Create a new instance of `Error` caused by hitting a token or
    /// recursion limit.
    pub fn limit<S: Into<String>>(message: S, index: usize) -> Self {
        Self {
            message: message.into(),
            data: String::new(),
            index,
            is_limit: true,
        }
    }

    /// Whether this error was caused by hitting a parser limit.
    pub fn is_limit(&self) -> bool {
        self.is_limit
    }

    /// Get a reference to the error's data. This is usually the token that
    /// was found to be lexically or syntactically incorrect.
    pub fn data(&self) -> &str {
        self.data.as_ref()
    }

    /// Get the error's index. This is where the error begins in the input.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get a reference to the error's message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.index;
        let end = self.index + self.data.len();

        if self.data == "EOF" || self.data.is_empty() {
            write!(
                f,
                "ERROR@{}:{} {:?} {}",
                start, start, self.message, self.data
            )
        } else {
            write!(
                f,
                "ERROR@{}:{} {:?} {}",
                start, end, self.message, self.data
            )
        }
    }
}
