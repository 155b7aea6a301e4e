//! Lexical analysis for build files.
//!
//! The scanner produces the token stream the parser consumes:
//!
//! - Bare words, function names (a word directly followed by `(`) and
//!   quoted strings
//! - Punctuation used by bindings, calls and lists
//! - `#` comments and whitespace are skipped
//! - Line/column spans for error reporting

pub mod lexer;
pub mod tokens;
