/// The kind of a lexed token.
///
/// Cypher keywords are not lexed as distinct kinds: the language is
/// case-insensitive and keywords are contextual, so they surface as `Name`
/// tokens and the parser matches them by text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    Comment,
    Name,
    /// A backtick-quoted identifier, backticks included.
    EscapedName,
    Int,
    Float,
    StringValue,
    Bang,       // !
    Dollar,     // $
    LParen,     // (
    RParen,     // )
    LBracket,   // [
    RBracket,   // ]
    LCurly,     // {
    RCurly,     // }
    Colon,      // :
    Semicolon,  // ;
    Comma,      // ,
    Dot,        // .
    DotDot,     // ..
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    Caret,      // ^
    Eq,         // =
    Neq,        // <> or !=
    Lt,         // <
    Gt,         // >
    Lte,        // <=
    Gte,        // >=
    Pipe,       // |
    RegexMatch, // =~
    Eof,
}
