//! MistCSS Lexer
//!
//! Tokenizes `.mist.css` stylesheets into a flat stream of CSS tokens on top
//! of the `cssparser` tokenizer. Keeps enough detail (quote style, byte spans,
//! comments) for the selector grammar to tell `[data-x='v']` apart from
//! `[data-x="v"]`, and rejects input the tokenizer would silently repair.
//!
//! # Example
//!
//! ```
//! use mist_lexer::Scanner;
//!
//! let tokens = Scanner::tokenize("").unwrap();
//! assert_eq!(tokens.len(), 1); // Just EOF
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{QuoteStyle, Span, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
