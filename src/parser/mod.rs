//! Parser module for building the declaration tree.
//!
//! This module turns a token stream into a `File`:
//!
//! - A state machine dispatching top-level declarations and bindings
//! - Recursive consumers for values, calls, parameter lists and lists
//! - `+` chains desugared into a synthetic `addition` call
//! - First-error-wins reporting
//!
//! Any `Iterator<Item = Token>` can feed the parser, including the blocking
//! receiver returned by `lexer::lexer::spawn_tokenizer`.

pub mod decl;
pub mod parser;
pub mod value;
