//! Project configuration.
//!
//! Settings come from three places, first hit wins:
//!
//! - The process environment
//! - The section of the project's `.build` file named after the OS
//! - The default (unnamed) section of the same file
//!
//! A `Config` is built once and handed to whoever needs it.

pub mod config;

#[cfg(test)]
mod tests;
