//! Lexer for egg, a language mixing shell commands and expressions.
//!
//! - A byte-at-a-time DFA ([`dfa`]) decides, per bare word, between a command
//!   argument (`EXEC_ARG`) and a language name (`NAME`) from bracket depth
//!   and the previous token.
//! - Operators are matched longest-first by a trie ([`operators`]); arithmetic
//!   operators are switched off right after a command argument so `file-1`
//!   stays one word.
//! - [`source`] owns the text, its line index and a registry of sources.

pub mod dfa;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod operators;
pub mod source;
pub mod token;

// Re-exports for convenience
pub use error::{Diag, DiagKind, LexError, LexErrorKind, SourceError, Span};
pub use lexer::{tokenize, Lexer, LexerState};
pub use source::{Source, SourceManager};
pub use token::{FileId, SourceLocation, Token, TokenKind};
