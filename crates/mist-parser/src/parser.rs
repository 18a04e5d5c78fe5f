//! Stylesheet compiler.
//!
//! Builds a `Stylesheet` tree with `cssparser`'s rule-list parsers: a
//! `StyleSheetParser` for the top level and a `RuleBodyParser` for every
//! block, so declarations, nested rules and statement or block at-rules
//! follow the CSS grammar. Nested selectors are resolved against their parent
//! rule (`&` is replaced, otherwise the parent becomes an ancestor), so every
//! `Rule` node carries complete selectors.
//!
//! `cssparser` recovers from malformed input by skipping it. Here the first
//! error aborts the whole compile, and the source is run through
//! `mist-lexer` beforehand so unclosed blocks and strings are rejected too.

use crate::ast::{CompiledNode, NodeKind, Stylesheet};
use crate::ParseError;
use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseErrorKind,
    Parser as CssParser, ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser,
    RuleBodyParser, StyleSheetParser, ToCss, Token,
};
use mist_lexer::Span;

type CssError<'i> = cssparser::ParseError<'i, String>;

/// Stylesheet parser.
///
/// Selector and prelude text is taken from the source, so quoting and
/// escapes survive unchanged.
pub struct Parser;

impl Parser {
    /// Parse stylesheet source into a tree.
    pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
        mist_lexer::Scanner::tokenize(source).map_err(|e| ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        })?;

        let mut input = ParserInput::new(source);
        let mut css = CssParser::new(&mut input);
        let mut rules = RuleParser::default();

        let mut nodes = Vec::new();
        for result in StyleSheetParser::new(&mut css, &mut rules) {
            match result {
                Ok(node) => nodes.push(node),
                Err((error, _)) => return Err(convert(error)),
            }
        }

        log::trace!("compiled stylesheet with {} top-level nodes", nodes.len());
        Ok(Stylesheet { nodes })
    }
}

// =============================================================================
// Rule lists
// =============================================================================

/// Parser for one level of rules. `parents` are the selectors of the
/// enclosing style rule, empty at the top level and passed through at-rules.
#[derive(Default)]
struct RuleParser {
    parents: Vec<String>,
}

impl RuleParser {
    /// Resolve a nested selector list against every parent selector.
    fn resolve(&self, parts: &[Part]) -> Vec<String> {
        if self.parents.is_empty() {
            return parts.iter().map(Part::text).collect();
        }

        let mut resolved = Vec::with_capacity(self.parents.len() * parts.len());
        for parent in &self.parents {
            for part in parts {
                resolved.push(if part.has_nesting() {
                    part.join(parent)
                } else {
                    format!("{parent} {}", part.text())
                });
            }
        }
        resolved
    }
}

/// Parse the items of a `{}` block.
fn parse_body<'i>(
    input: &mut CssParser<'i, '_>,
    parents: Vec<String>,
) -> Result<Vec<CompiledNode>, CssError<'i>> {
    let mut parser = RuleParser { parents };
    let mut children = Vec::new();

    for result in RuleBodyParser::new(input, &mut parser) {
        children.push(result.map_err(|(error, _)| error)?);
    }

    Ok(children)
}

impl<'i> QualifiedRuleParser<'i> for RuleParser {
    type Prelude = Vec<String>;
    type QualifiedRule = CompiledNode;
    type Error = String;

    /// `a:scope[data-size='sm'], a:scope[data-size='md']`
    fn parse_prelude<'t>(
        &mut self,
        input: &mut CssParser<'i, 't>,
    ) -> Result<Self::Prelude, CssError<'i>> {
        let location = input.current_source_location();
        let parts = PreludeReader::read(input, true)?;

        if parts.iter().any(Part::is_empty) {
            return Err(location.new_custom_error("Expected selector before '{'"));
        }

        Ok(self.resolve(&parts))
    }

    fn parse_block<'t>(
        &mut self,
        selector_parts: Self::Prelude,
        start: &ParserState,
        input: &mut CssParser<'i, 't>,
    ) -> Result<Self::QualifiedRule, CssError<'i>> {
        let children = parse_body(input, selector_parts.clone())?;
        let span = span_between(start, input.position().byte_index());
        Ok(CompiledNode::new(NodeKind::Rule, selector_parts, span).with_children(children))
    }
}

/// `(lowercased name, prelude parts, end of prelude)`
type AtRulePrelude = (String, Vec<String>, usize);

impl<'i> AtRuleParser<'i> for RuleParser {
    type Prelude = AtRulePrelude;
    type AtRule = CompiledNode;
    type Error = String;

    /// `@scope (.card)` → `["(.card)"]`, `@media screen, print` → `["screen", "print"]`
    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut CssParser<'i, 't>,
    ) -> Result<Self::Prelude, CssError<'i>> {
        let parts = PreludeReader::read(input, true)?
            .iter()
            .map(Part::text)
            .filter(|part| !part.is_empty())
            .collect();

        Ok((name.to_ascii_lowercase(), parts, input.position().byte_index()))
    }

    fn rule_without_block(
        &mut self,
        (name, parts, end): Self::Prelude,
        start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(CompiledNode::new(NodeKind::AtRule(name), parts, span_between(start, end)))
    }

    fn parse_block<'t>(
        &mut self,
        (name, parts, _): Self::Prelude,
        start: &ParserState,
        input: &mut CssParser<'i, 't>,
    ) -> Result<Self::AtRule, CssError<'i>> {
        let children = parse_body(input, self.parents.clone())?;
        let span = span_between(start, input.position().byte_index());
        Ok(CompiledNode::new(NodeKind::AtRule(name), parts, span).with_children(children))
    }
}

impl<'i> DeclarationParser<'i> for RuleParser {
    type Declaration = CompiledNode;
    type Error = String;

    /// `property: value`. Fails when the value holds a `{}` block, which
    /// makes the item a nested rule such as `a:hover { ... }` instead.
    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut CssParser<'i, 't>,
        declaration_start: &ParserState,
    ) -> Result<Self::Declaration, CssError<'i>> {
        if !name.starts_with("--") {
            let state = input.state();
            while let Ok(token) = input.next() {
                if matches!(token, Token::CurlyBracketBlock) {
                    return Err(input.new_custom_error(format!("Unexpected '{{' in value of '{name}'")));
                }
            }
            input.reset(&state);
        }

        let value = PreludeReader::read(input, false)?
            .iter()
            .map(Part::text)
            .collect::<String>();
        let span = span_between(declaration_start, input.position().byte_index());

        Ok(CompiledNode::new(
            NodeKind::Declaration,
            vec![name.to_string(), value],
            span,
        ))
    }
}

impl<'i> RuleBodyItemParser<'i, CompiledNode, String> for RuleParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        true
    }
}

// =============================================================================
// Prelude text
// =============================================================================

/// One comma separated entry of a prelude, split at each `&`.
struct Part {
    segments: Vec<String>,
}

impl Default for Part {
    fn default() -> Self {
        Self {
            segments: vec![String::new()],
        }
    }
}

impl Part {
    fn is_empty(&self) -> bool {
        self.segments.iter().all(String::is_empty) && !self.has_nesting()
    }

    fn has_nesting(&self) -> bool {
        self.segments.len() > 1
    }

    /// The text with each `&` replaced by `parent`.
    fn join(&self, parent: &str) -> String {
        self.segments.join(parent)
    }

    /// The text as written.
    fn text(&self) -> String {
        self.join("&")
    }
}

/// Renders prelude tokens back to source text. Whitespace and comment runs
/// become a single space and are trimmed at both ends.
#[derive(Default)]
struct PreludeReader {
    parts: Vec<Part>,
    current: Part,
    pending_space: bool,
}

impl PreludeReader {
    /// Read the rest of `input`, splitting on top-level commas when `split`.
    fn read<'i>(input: &mut CssParser<'i, '_>, split: bool) -> Result<Vec<Part>, CssError<'i>> {
        let mut reader = PreludeReader::default();
        reader.read_tokens(input, split)?;
        reader.parts.push(reader.current);
        Ok(reader.parts)
    }

    fn read_tokens<'i>(
        &mut self,
        input: &mut CssParser<'i, '_>,
        split: bool,
    ) -> Result<(), CssError<'i>> {
        loop {
            let start = input.position();
            let token = match input.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => return Ok(()),
            };

            match token {
                Token::WhiteSpace(_) | Token::Comment(_) => self.pending_space = true,
                Token::Comma if split => {
                    self.parts.push(std::mem::take(&mut self.current));
                    self.pending_space = false;
                }
                Token::Delim('&') => {
                    self.flush_space();
                    self.current.segments.push(String::new());
                }
                Token::Function(_)
                | Token::ParenthesisBlock
                | Token::SquareBracketBlock
                | Token::CurlyBracketBlock => {
                    let closer = match token {
                        Token::SquareBracketBlock => "]",
                        Token::CurlyBracketBlock => "}",
                        _ => ")",
                    };
                    self.push_text(input.slice_from(start));
                    input.parse_nested_block(|inner: &mut CssParser<'i, '_>| {
                        self.read_tokens(inner, false)
                    })?;
                    self.push_text(closer);
                }
                _ => self.push_text(input.slice_from(start)),
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        self.flush_space();
        if let Some(segment) = self.current.segments.last_mut() {
            segment.push_str(text);
        }
    }

    fn flush_space(&mut self) {
        if std::mem::take(&mut self.pending_space) && !self.current.is_empty() {
            if let Some(segment) = self.current.segments.last_mut() {
                segment.push(' ');
            }
        }
    }
}

// =============================================================================
// Positions and errors
// =============================================================================

fn span_between(start: &ParserState, end: usize) -> Span {
    let location = start.source_location();
    Span::new(
        start.position().byte_index(),
        end,
        location.line as usize + 1,
        location.column as usize,
    )
}

fn convert(error: CssError<'_>) -> ParseError {
    let message = match error.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("Unexpected '{}'", token.to_css_string())
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "Unexpected end of input".into()
        }
        ParseErrorKind::Basic(BasicParseErrorKind::AtRuleInvalid(name)) => {
            format!("Invalid @{name} rule")
        }
        ParseErrorKind::Basic(other) => format!("Invalid stylesheet: {other:?}"),
    };

    ParseError {
        message,
        line: error.location.line as usize + 1,
        column: error.location.column as usize,
    }
}
