use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Builds an `Io` error for a failed filesystem operation on `path`.
    pub fn io(path: impl AsRef<std::path::Path>, error: std::io::Error) -> Self {
        Error::new(
            ErrorImpl::Io {
                path: path.as_ref().to_string_lossy().into_owned(),
                message: error.to_string(),
            },
            Position::null(),
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::TruncatedInput => "TruncatedInput",
            ErrorImpl::MalformedConfig { .. } => "MalformedConfig",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "expected {}, found `{}`",
                expected, token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::TruncatedInput => {
                ErrorTip::Suggestion(String::from("the scanner stopped before end of input"))
            }
            ErrorImpl::MalformedConfig { line } => ErrorTip::Suggestion(format!(
                "Expected `[section]` or `key = value`, found `{}`",
                line
            )),
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position == Position::null() {
            write!(f, "{}", self.internal_error)
        } else {
            write!(
                f,
                "{}:{}: {}",
                self.position.line, self.position.column, self.internal_error
            )
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("token source closed before end of input")]
    TruncatedInput,
    #[error("malformed config line: {line:?}")]
    MalformedConfig { line: String },
    #[error("{path}: {message}")]
    Io { path: String, message: String },
}
