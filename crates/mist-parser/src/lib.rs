//! MistCSS Parser
//!
//! Compiles a token stream into a tree of [`CompiledNode`]s following the
//! standard CSS block grammar (rules, at-rules, declarations, nesting), and
//! provides a typed selector grammar ([`Selector`]) for reading the selector
//! text those nodes carry.
//!
//! ```text
//! source → Scanner::tokenize() → Parser → Stylesheet { nodes }
//! ```
//!
//! # Example
//!
//! ```
//! let sheet = mist_parser::compile("@scope (.card) { :scope { color: red } }").unwrap();
//! assert_eq!(sheet.nodes.len(), 1);
//! assert!(sheet.nodes[0].is_scope());
//! ```

pub mod ast;
pub mod parser;
pub mod selector;

pub use ast::{CompiledNode, NodeKind, Stylesheet};
pub use parser::Parser;
pub use selector::{Combinator, Fragment, FragmentKind, Selector};

/// Parser error with position information. Any malformed stylesheet is
/// reported through this type; there is no partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Compile stylesheet source into a tree of nodes.
pub fn compile(source: &str) -> Result<Stylesheet, ParseError> {
    Parser::parse(source)
}
