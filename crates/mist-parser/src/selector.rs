//! Selector grammar.
//!
//! Reads one selector (a single entry of a rule's `selector_parts`) into a
//! flat list of typed fragments. Parsing never fails: anything outside the
//! grammar becomes [`FragmentKind::Unknown`] and is left for the caller to
//! ignore.
//!
//! ```text
//! a:scope[data-size='sm'][data-disabled]
//! └┬┘└─┬─┘└──────┬──────┘└──────┬──────┘
//! Type PseudoClass AttributeEquals AttributePresence
//! ```

use mist_lexer::{QuoteStyle, Scanner, Token, TokenKind};

/// A parsed selector, keeping its source text so callers can slice it
/// at fragment boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    text: String,
    fragments: Vec<Fragment>,
}

/// One fragment and its byte offset within the selector text.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentKind {
    /// `div`
    Type(String),
    /// `*`
    Universal,
    /// `.name`
    Class(String),
    /// `#name`
    Id(String),
    /// `:name` or `:name(...)`
    PseudoClass(String),
    /// `::name`
    PseudoElement(String),
    /// `&`
    Nesting,
    /// `[name]`
    AttributePresence { name: String },
    /// `[name=value]`, `[name='value']`, `[name="value"]`
    AttributeEquals {
        name: String,
        value: String,
        /// `None` for an unquoted identifier value.
        quote: Option<QuoteStyle>,
    },
    /// Any other attribute selector: `[name^='x']`, `[name='x' i]`
    AttributeOther { name: String },
    Combinator(Combinator),
    Unknown,
}

impl FragmentKind {
    pub fn is_attribute(&self) -> bool {
        matches!(
            self,
            FragmentKind::AttributePresence { .. }
                | FragmentKind::AttributeEquals { .. }
                | FragmentKind::AttributeOther { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`
    NextSibling,
    /// `~`
    SubsequentSibling,
}

impl Selector {
    /// Parse selector text into fragments.
    pub fn parse(text: &str) -> Self {
        let fragments = match Scanner::tokenize(text) {
            Ok(tokens) => FragmentReader::new(&tokens).read(),
            Err(e) => {
                log::trace!("selector {text:?} is not tokenizable: {e}");
                vec![Fragment {
                    kind: FragmentKind::Unknown,
                    offset: 0,
                }]
            }
        };

        Self {
            text: text.to_string(),
            fragments,
        }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The selector text before fragment `index`, with trailing whitespace removed.
    pub fn text_before(&self, index: usize) -> &str {
        let end = self
            .fragments
            .get(index)
            .map_or(self.text.len(), |f| f.offset);
        self.text[..end].trim_end()
    }
}

/// Cursor over selector tokens. Trivia is significant here (it is the
/// descendant combinator), so it is tracked rather than skipped.
struct FragmentReader<'t> {
    tokens: &'t [Token],
    pos: usize,
    fragments: Vec<Fragment>,
    pending_descendant: Option<usize>,
}

impl<'t> FragmentReader<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            fragments: Vec::new(),
            pending_descendant: None,
        }
    }

    fn read(mut self) -> Vec<Fragment> {
        let tokens = self.tokens;

        while let Some(token) = tokens.get(self.pos) {
            let offset = token.span.start;

            match &token.kind {
                TokenKind::Eof => break,
                kind if kind.is_trivia() => {
                    let after_compound = self
                        .fragments
                        .last()
                        .is_some_and(|f| !matches!(f.kind, FragmentKind::Combinator(_)));
                    if after_compound && self.pending_descendant.is_none() {
                        self.pending_descendant = Some(offset);
                    }
                    self.pos += 1;
                }
                TokenKind::Delim(c @ ('>' | '+' | '~')) => {
                    let combinator = match *c {
                        '>' => Combinator::Child,
                        '+' => Combinator::NextSibling,
                        _ => Combinator::SubsequentSibling,
                    };
                    // Whitespace around an explicit combinator is not a descendant combinator
                    self.pending_descendant = None;
                    self.pos += 1;
                    self.push(FragmentKind::Combinator(combinator), offset);
                }
                TokenKind::Ident(name) => {
                    let name = name.clone();
                    self.pos += 1;
                    self.push_compound(FragmentKind::Type(name), offset);
                }
                TokenKind::Delim('*') => {
                    self.pos += 1;
                    self.push_compound(FragmentKind::Universal, offset);
                }
                TokenKind::Delim('&') => {
                    self.pos += 1;
                    self.push_compound(FragmentKind::Nesting, offset);
                }
                TokenKind::Delim('.') => {
                    self.pos += 1;
                    let kind = match self.ident_here() {
                        Some(name) => {
                            self.pos += 1;
                            FragmentKind::Class(name)
                        }
                        None => FragmentKind::Unknown,
                    };
                    self.push_compound(kind, offset);
                }
                TokenKind::Hash(name) => {
                    let name = name.clone();
                    self.pos += 1;
                    self.push_compound(FragmentKind::Id(name), offset);
                }
                TokenKind::Colon => {
                    let kind = self.read_pseudo();
                    self.push_compound(kind, offset);
                }
                TokenKind::LBracket => {
                    let kind = self.read_attribute();
                    self.push_compound(kind, offset);
                }
                _ => {
                    self.pos += 1;
                    self.push_compound(FragmentKind::Unknown, offset);
                }
            }
        }

        self.fragments
    }

    /// `:name`, `:name(...)`, `::name`. The current token is the first colon.
    fn read_pseudo(&mut self) -> FragmentKind {
        self.pos += 1; // consume `:`

        let element = matches!(self.kind_here(), Some(TokenKind::Colon));
        if element {
            self.pos += 1;
        }

        let name = match self.kind_here() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                name
            }
            // `:not(...)`: the arguments are not part of the fragment
            Some(TokenKind::Function(name)) => {
                let name = name.clone();
                self.skip_balanced();
                name
            }
            _ => return FragmentKind::Unknown,
        };

        if element {
            FragmentKind::PseudoElement(name)
        } else {
            FragmentKind::PseudoClass(name)
        }
    }

    /// `[name]`, `[name=value]`, `[name op= value flags]`. The current token is `[`.
    fn read_attribute(&mut self) -> FragmentKind {
        let start = self.pos;
        self.skip_balanced();
        let end = self.pos;

        let closed = end > start + 1 && matches!(self.tokens[end - 1].kind, TokenKind::RBracket);
        if !closed {
            return FragmentKind::Unknown;
        }

        // Significant tokens between the brackets
        let inner: Vec<&TokenKind> = self.tokens[start + 1..end - 1]
            .iter()
            .map(|t| &t.kind)
            .filter(|k| !k.is_trivia())
            .collect();

        match inner.as_slice() {
            [TokenKind::Ident(name)] => FragmentKind::AttributePresence { name: name.clone() },
            [TokenKind::Ident(name), TokenKind::Delim('='), value] => match value {
                TokenKind::String { value, quote } => FragmentKind::AttributeEquals {
                    name: name.clone(),
                    value: value.clone(),
                    quote: Some(*quote),
                },
                TokenKind::Ident(value) => FragmentKind::AttributeEquals {
                    name: name.clone(),
                    value: value.clone(),
                    quote: None,
                },
                _ => FragmentKind::AttributeOther { name: name.clone() },
            },
            [TokenKind::Ident(name), ..] => FragmentKind::AttributeOther { name: name.clone() },
            _ => FragmentKind::Unknown,
        }
    }

    /// Skip from an opening `name(`, `(`, `[` or `{` past its matching closer
    /// (or to the end).
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;

        while let Some(token) = self.tokens.get(self.pos) {
            match token.kind {
                TokenKind::Function(_)
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Eof => return,
                _ => {}
            }
            self.pos += 1;
            if depth == 0 {
                return;
            }
        }
    }

    fn push_compound(&mut self, kind: FragmentKind, offset: usize) {
        if let Some(ws) = self.pending_descendant.take() {
            self.fragments.push(Fragment {
                kind: FragmentKind::Combinator(Combinator::Descendant),
                offset: ws,
            });
        }
        self.push(kind, offset);
    }

    fn push(&mut self, kind: FragmentKind, offset: usize) {
        self.fragments.push(Fragment { kind, offset });
    }

    fn kind_here(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn ident_here(&self) -> Option<String> {
        match self.kind_here() {
            Some(TokenKind::Ident(name)) => Some(name.clone()),
            _ => None,
        }
    }
}
