/// A position in source text. `start`/`end` are byte offsets, `line` and
/// `column` are 1-based and point at the first character of the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Which quote character delimited a string token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Single,
    Double,
}

/// Token classification for CSS source.
///
/// Data-carrying variants embed their value directly (no separate `value` field on Token).
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Trivia
    Whitespace,
    Comment(String),

    // Names and literals (carry data)
    Ident(String),
    AtKeyword(String),
    Hash(String),
    String { value: String, quote: QuoteStyle },
    /// Unquoted `url(...)`, value only.
    Url(String),
    /// Raw numeric text including any unit: `12`, `-1.5em`, `50%`.
    Number(String),
    /// `name(`; the arguments follow and an `RParen` closes it.
    Function(String),
    /// Attribute matchers other than `=`: `~=`, `|=`, `^=`, `$=`, `*=`.
    Matcher(String),

    // Punctuation
    Colon,
    Semicolon,
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,

    /// Any other single character (`.`, `>`, `+`, `~`, `*`, `=`, `&`, ...).
    Delim(char),

    /// `<!--` and `-->`
    Cdo,
    Cdc,

    // End of input
    Eof,
}

impl TokenKind {
    /// Whitespace and comments carry no grammar.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment(_))
    }
}

/// A token produced by the CSS lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
