use crate::token::{QuoteStyle, Span, Token, TokenKind};
use crate::LexerError;
use cssparser::{Parser, ParserInput, SourceLocation, Token as CssToken};

/// CSS source scanner.
///
/// Runs the `cssparser` tokenizer over a stylesheet and flattens its output
/// into a single stream: blocks and functions are entered, so every `{`, `(`
/// and `[` is followed by its contents and then a matching closing token.
/// Input that the tokenizer recovers from silently (unclosed blocks, strings
/// and comments cut off by the end of input) is reported as an error here.
///
/// - Escapes in identifiers and strings are decoded
/// - Quote style is recovered from the source text
/// - Spans are byte offsets with 1-based line and column
pub struct Scanner {
    tokens: Vec<Token>,
}

impl Scanner {
    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let mut scanner = Scanner { tokens: Vec::new() };

        scanner.scan_tokens(&mut parser)?;

        let end = parser.position().byte_index();
        let eof = span(end, end, parser.current_source_location());
        scanner.tokens.push(Token::new(TokenKind::Eof, eof));
        Ok(scanner.tokens)
    }

    /// Scan tokens until the end of the input or of the enclosing block.
    fn scan_tokens<'i>(&mut self, input: &mut Parser<'i, '_>) -> Result<(), LexerError> {
        loop {
            let start = input.position();
            let location = input.current_source_location();
            let token = match input.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => return Ok(()),
            };
            let raw = input.slice_from(start);
            let here = span(start.byte_index(), input.position().byte_index(), location);

            let kind = match token {
                CssToken::WhiteSpace(_) => TokenKind::Whitespace,
                CssToken::Comment(text) => {
                    if raw.len() < 4 || !raw.ends_with("*/") {
                        return Err(error("Unterminated comment", location));
                    }
                    TokenKind::Comment(text.trim().to_string())
                }

                CssToken::Ident(name) => TokenKind::Ident(name.to_string()),
                CssToken::AtKeyword(name) => TokenKind::AtKeyword(name.to_string()),
                CssToken::Hash(name) | CssToken::IDHash(name) => TokenKind::Hash(name.to_string()),
                CssToken::QuotedString(value) => {
                    let quote = if raw.starts_with('\'') {
                        QuoteStyle::Single
                    } else {
                        QuoteStyle::Double
                    };
                    if !is_closed_string(raw, quote) {
                        return Err(error("Unterminated string", location));
                    }
                    TokenKind::String {
                        value: value.to_string(),
                        quote,
                    }
                }
                CssToken::UnquotedUrl(url) => TokenKind::Url(url.to_string()),
                CssToken::Number { .. }
                | CssToken::Percentage { .. }
                | CssToken::Dimension { .. } => TokenKind::Number(raw.to_string()),

                CssToken::Colon => TokenKind::Colon,
                CssToken::Semicolon => TokenKind::Semicolon,
                CssToken::Comma => TokenKind::Comma,
                CssToken::Delim(c) => TokenKind::Delim(c),
                CssToken::IncludeMatch
                | CssToken::DashMatch
                | CssToken::PrefixMatch
                | CssToken::SuffixMatch
                | CssToken::SubstringMatch => TokenKind::Matcher(raw.to_string()),
                CssToken::CDO => TokenKind::Cdo,
                CssToken::CDC => TokenKind::Cdc,

                // Blocks: the opening token, the contents, then the closer
                CssToken::Function(name) => {
                    self.push(TokenKind::Function(name.to_string()), here);
                    self.scan_block(input, '(', location)?;
                    continue;
                }
                CssToken::ParenthesisBlock => {
                    self.push(TokenKind::LParen, here);
                    self.scan_block(input, '(', location)?;
                    continue;
                }
                CssToken::SquareBracketBlock => {
                    self.push(TokenKind::LBracket, here);
                    self.scan_block(input, '[', location)?;
                    continue;
                }
                CssToken::CurlyBracketBlock => {
                    self.push(TokenKind::LBrace, here);
                    self.scan_block(input, '{', location)?;
                    continue;
                }

                // Matched closers are emitted by `scan_block`
                CssToken::CloseParenthesis => return Err(error("Unexpected ')'", location)),
                CssToken::CloseSquareBracket => return Err(error("Unexpected ']'", location)),
                CssToken::CloseCurlyBracket => return Err(error("Unexpected '}'", location)),

                CssToken::BadString(_) => {
                    return Err(error("Unterminated string, newline before closing quote", location))
                }
                CssToken::BadUrl(_) => return Err(error("Invalid url()", location)),
            };

            self.push(kind, here);
        }
    }

    /// Scan the contents of a block whose opening token was just consumed,
    /// then emit its closing token.
    fn scan_block<'i>(
        &mut self,
        input: &mut Parser<'i, '_>,
        open: char,
        location: SourceLocation,
    ) -> Result<(), LexerError> {
        let nested = input.parse_nested_block(|inner: &mut Parser<'i, '_>| {
            let scanned = self
                .scan_tokens(inner)
                .map(|()| (inner.position().byte_index(), inner.current_source_location()));
            Ok::<_, cssparser::ParseError<'i, ()>>(scanned)
        });
        let (contents_end, close_location) = match nested {
            Ok(scanned) => scanned?,
            Err(_) => return Err(error(format!("Malformed '{open}' block"), location)),
        };

        // The closer is the only thing consumed after the contents
        let end = input.position().byte_index();
        if end == contents_end {
            let message = match open {
                '{' => "Unclosed block, expected '}'".to_string(),
                _ => format!("Unclosed '{open}'"),
            };
            return Err(error(message, location));
        }

        let kind = match open {
            '{' => TokenKind::RBrace,
            '[' => TokenKind::RBracket,
            _ => TokenKind::RParen,
        };
        self.push(kind, span(contents_end, end, close_location));
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }
}

/// Whether a quoted string's source text ends with an unescaped closing quote.
fn is_closed_string(raw: &str, quote: QuoteStyle) -> bool {
    let closer = match quote {
        QuoteStyle::Single => '\'',
        QuoteStyle::Double => '"',
    };
    let Some(body) = raw.get(1..).and_then(|body| body.strip_suffix(closer)) else {
        return false;
    };
    body.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0
}

fn span(start: usize, end: usize, location: SourceLocation) -> Span {
    Span::new(
        start,
        end,
        location.line as usize + 1,
        location.column as usize,
    )
}

fn error(message: impl Into<String>, location: SourceLocation) -> LexerError {
    LexerError {
        message: message.into(),
        line: location.line as usize + 1,
        column: location.column as usize,
    }
}
