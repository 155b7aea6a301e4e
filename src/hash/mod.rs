//! Build-input fingerprinting.
//!
//! Files and directories are streamed into a `Write` sink as a sequence of
//! `file <path>` records, each followed by the file's bytes and its size.
//! Feeding that stream into SHA-256 gives a stable fingerprint of the
//! inputs.

pub mod hash;

#[cfg(test)]
mod tests;
