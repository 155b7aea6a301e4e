//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "]".to_string(),
            expected: "`)`".to_string(),
        },
        Position::new(4, 42),
    );

    assert_eq!(error.get_position().line, 4);
    assert_eq!(error.get_position().column, 42);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "=".to_string(),
            expected: "`(`".to_string(),
        },
        Position::new(1, 1),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_tip().to_string(), "expected `(`, found `=`");
}

#[test]
fn test_unexpected_token_detailed_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: "]".to_string(),
            message: "trailing comma in list".to_string(),
        },
        Position::new(1, 1),
    );

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `]`, trailing comma in list"
    );
}

#[test]
fn test_malformed_config_error() {
    let error = Error::new(
        ErrorImpl::MalformedConfig {
            line: "[linux".to_string(),
        },
        Position::new(3, 1),
    );

    assert_eq!(error.get_error_name(), "MalformedConfig");
}

#[test]
fn test_io_error_has_no_position() {
    let error = Error::io(
        "/nonexistent/file",
        std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    );

    assert_eq!(error.get_error_name(), "Io");
    assert_eq!(*error.get_position(), Position::null());
    assert_eq!(error.to_string(), "/nonexistent/file: not found");
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position::new(2, 12),
    );

    assert_eq!(error.to_string(), "2:12: unrecognised token: \"$\"");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_truncated_input_error() {
    let error = Error::new(ErrorImpl::TruncatedInput, Position::null());

    assert_eq!(error.get_error_name(), "TruncatedInput");
    assert_eq!(error.to_string(), "token source closed before end of input");
}
