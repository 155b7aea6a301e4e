//! Error types and error handling for the build-file tooling.
//!
//! This module defines the single error type shared by every stage:
//!
//! - Lexical errors reported by the scanner
//! - Unexpected tokens met by the parser
//! - Malformed `.build` config lines
//! - I/O failures while fingerprinting build inputs

pub mod errors;

#[cfg(test)]
mod tests;
