mod token;
mod token_kind;

use crate::Error;
use crate::LimitTracker;

pub use token::Token;
pub use token_kind::TokenKind;

/// Parses text into tokens.
///
/// The lexer is an iterator over `Result<Token, Error>`: lexical errors do
/// not stop the token stream, they are yielded in sequence so the parser can
/// keep byte positions intact. A single `Eof` token is yielded at the end of
/// the input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    index: usize,
    finished: bool,
    pub(crate) limit_tracker: LimitTracker,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for an input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            index: 0,
            finished: false,
            limit_tracker: LimitTracker::new(usize::MAX),
        }
    }

    /// Abort lexing after `limit` tokens.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit_tracker = LimitTracker::new(limit);
        self
    }

    /// Lex the full input and collect the tokens and errors it produced.
    pub fn lex(self) -> (Vec<Token<'a>>, Vec<Error>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        for item in self {
            match item {
                Ok(token) => tokens.push(token),
                Err(error) => errors.push(error),
            }
        }
        (tokens, errors)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.limit_tracker.consume();
        if self.limit_tracker.limited() {
            self.finished = true;
            return Some(Err(Error::limit(
                "token limit reached, aborting lexing",
                self.index,
            )));
        }

        if self.index >= self.input.len() {
            self.finished = true;
            return Some(Ok(Token {
                kind: TokenKind::Eof,
                data: "",
                index: self.index,
            }));
        }

        let rest = &self.input[self.index..];
        let index = self.index;
        match scan_token(rest) {
            Ok((kind, len)) => {
                self.index += len;
                Some(Ok(Token {
                    kind,
                    data: &rest[..len],
                    index,
                }))
            }
            Err((message, len)) => {
                self.index += len;
                Some(Err(Error::with_loc(message, rest[..len].to_string(), index)))
            }
        }
    }
}

type Scanned = Result<(TokenKind, usize), (String, usize)>;

fn scan_token(rest: &str) -> Scanned {
    let c = rest.chars().next().expect("scan_token called on empty input");
    match c {
        c if is_whitespace(c) => Ok((TokenKind::Whitespace, scan_while(rest, is_whitespace))),
        '/' if rest.starts_with("//") => Ok((TokenKind::Comment, scan_line_comment(rest))),
        '/' if rest.starts_with("/*") => Ok((TokenKind::Comment, scan_block_comment(rest))),
        '\'' | '"' => scan_string(rest, c),
        '`' => scan_escaped_name(rest),
        c if is_name_start(c) => Ok((TokenKind::Name, scan_while(rest, is_name_continue))),
        c if c.is_ascii_digit() => Ok(scan_number(rest)),
        '.' => {
            if rest[1..].starts_with('.') {
                Ok((TokenKind::DotDot, 2))
            } else {
                Ok((TokenKind::Dot, 1))
            }
        }
        '<' => match rest[1..].chars().next() {
            Some('=') => Ok((TokenKind::Lte, 2)),
            Some('>') => Ok((TokenKind::Neq, 2)),
            _ => Ok((TokenKind::Lt, 1)),
        },
        '>' => {
            if rest[1..].starts_with('=') {
                Ok((TokenKind::Gte, 2))
            } else {
                Ok((TokenKind::Gt, 1))
            }
        }
        '=' => {
            if rest[1..].starts_with('~') {
                Ok((TokenKind::RegexMatch, 2))
            } else {
                Ok((TokenKind::Eq, 1))
            }
        }
        '!' => {
            if rest[1..].starts_with('=') {
                Ok((TokenKind::Neq, 2))
            } else {
                Ok((TokenKind::Bang, 1))
            }
        }
        '$' => Ok((TokenKind::Dollar, 1)),
        '(' => Ok((TokenKind::LParen, 1)),
        ')' => Ok((TokenKind::RParen, 1)),
        '[' => Ok((TokenKind::LBracket, 1)),
        ']' => Ok((TokenKind::RBracket, 1)),
        '{' => Ok((TokenKind::LCurly, 1)),
        '}' => Ok((TokenKind::RCurly, 1)),
        ':' => Ok((TokenKind::Colon, 1)),
        ';' => Ok((TokenKind::Semicolon, 1)),
        ',' => Ok((TokenKind::Comma, 1)),
        '+' => Ok((TokenKind::Plus, 1)),
        '-' => Ok((TokenKind::Minus, 1)),
        '*' => Ok((TokenKind::Star, 1)),
        '/' => Ok((TokenKind::Slash, 1)),
        '%' => Ok((TokenKind::Percent, 1)),
        '^' => Ok((TokenKind::Caret, 1)),
        '|' => Ok((TokenKind::Pipe, 1)),
        c => Err((format!("unexpected character `{c}`"), c.len_utf8())),
    }
}

fn scan_while(rest: &str, pred: impl Fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(rest.len(), |(i, _)| i)
}

fn scan_line_comment(rest: &str) -> usize {
    rest.find('\n').unwrap_or(rest.len())
}

fn scan_block_comment(rest: &str) -> usize {
    rest.find("*/").map_or(rest.len(), |i| i + 2)
}

/// Scan a quoted string. A backslash escapes the following character and a
/// doubled quote is an embedded quote.
fn scan_string(rest: &str, quote: char) -> Scanned {
    let mut chars = rest.char_indices();
    chars.next(); // the opening quote
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            match chars.clone().next() {
                Some((_, next)) if next == quote => {
                    chars.next();
                }
                _ => return Ok((TokenKind::StringValue, i + 1)),
            }
        }
    }
    Err(("unterminated string literal".to_string(), rest.len()))
}

fn scan_escaped_name(rest: &str) -> Scanned {
    match rest[1..].find('`') {
        Some(i) => Ok((TokenKind::EscapedName, i + 2)),
        None => Err(("unterminated escaped name".to_string(), rest.len())),
    }
}

fn scan_number(rest: &str) -> (TokenKind, usize) {
    let bytes = rest.as_bytes();

    // Hex and octal integers: 0x1F, 0o17.
    if bytes[0] == b'0' && rest.len() > 1 && matches!(bytes[1], b'x' | b'X' | b'o' | b'O') {
        let digits = scan_while(&rest[2..], |c| c.is_ascii_alphanumeric());
        if digits > 0 {
            return (TokenKind::Int, 2 + digits);
        }
    }

    let mut len = scan_while(rest, |c| c.is_ascii_digit());
    let mut is_float = false;

    // A fractional part only when the dot is not a `..` range and is
    // followed by a digit.
    if rest[len..].starts_with('.') {
        let after = &rest[len + 1..];
        if after.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            len += 1 + scan_while(after, |c| c.is_ascii_digit());
        }
    }

    if rest[len..].starts_with(['e', 'E']) {
        let mut exp = 1;
        let after = &rest[len + 1..];
        let after = if after.starts_with(['+', '-']) {
            exp += 1;
            &after[1..]
        } else {
            after
        };
        let digits = scan_while(after, |c| c.is_ascii_digit());
        if digits > 0 {
            is_float = true;
            len += exp + digits;
        }
    }

    if is_float {
        (TokenKind::Float, len)
    } else {
        (TokenKind::Int, len)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{000B}' | '\u{000C}' | '\u{FEFF}')
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .lex()
            .0
            .into_iter()
            .map(|token| token.kind())
            .filter(|kind| !matches!(kind, TokenKind::Whitespace | TokenKind::Eof))
            .collect()
    }

    #[test]
    fn lexes_a_relationship_pattern() {
        use TokenKind::*;
        assert_eq!(
            kinds("(p:Pod)-[:BelongsTo]->(ns)"),
            vec![
                LParen, Name, Colon, Name, RParen, Minus, LBracket, Colon, Name, RBracket, Minus,
                Gt, LParen, Name, RParen,
            ]
        );
    }

    #[test]
    fn lexes_compound_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("a <> b <= c >= d =~ e != f"),
            vec![Name, Neq, Name, Lte, Name, Gte, Name, RegexMatch, Name, Neq, Name]
        );
    }

    #[test]
    fn range_dots_do_not_start_a_float() {
        use TokenKind::*;
        assert_eq!(kinds("*1..3"), vec![Star, Int, DotDot, Int]);
        assert_eq!(kinds("1.5"), vec![Float]);
        assert_eq!(kinds("1e-9"), vec![Float]);
        assert_eq!(kinds("0o17"), vec![Int]);
    }

    #[test]
    fn doubled_quote_is_an_embedded_quote() {
        let (tokens, errors) = Lexer::new("'it''s fine'").lex();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind(), TokenKind::StringValue);
        assert_eq!(tokens[0].data(), "'it''s fine'");
    }

    #[test]
    fn backslash_escapes_a_quote() {
        let (tokens, errors) = Lexer::new(r"'a\'b'").lex();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].data(), r"'a\'b'");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let (_, errors) = Lexer::new("'oops").lex();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "unterminated string literal");
    }

    #[test]
    fn comments_are_trivia_tokens() {
        let (tokens, _) = Lexer::new("RETURN 1 // trailing\n/* block */").lex();
        let comments: Vec<_> = tokens
            .iter()
            .filter(|token| token.kind() == TokenKind::Comment)
            .map(|token| token.data())
            .collect();
        assert_eq!(comments, vec!["// trailing", "/* block */"]);
    }

    #[test]
    fn token_limit_aborts_lexing() {
        let (_, errors) = Lexer::new("MATCH (n) RETURN n").with_limit(3).lex();
        assert!(errors.iter().any(|error| error.is_limit()));
    }
}
