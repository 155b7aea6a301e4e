#![allow(clippy::module_inception)]

use std::{fs, path::Path};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod config;
pub mod errors;
pub mod hash;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based line and column inside a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_line(content: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    content
        .split('\n')
        .nth((line - 1) as usize)
        .map(|l| l.trim_end_matches('\r'))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line() {
        let content = "Hello, world!\nsecond\r\n\nTesting { }\n";
        assert_eq!(super::get_line(content, 1), Some("Hello, world!"));
        assert_eq!(super::get_line(content, 2), Some("second"));
        assert_eq!(super::get_line(content, 3), Some(""));
        assert_eq!(super::get_line(content, 4), Some("Testing { }"));
        assert_eq!(super::get_line(content, 0), None);
        assert_eq!(super::get_line(content, 9), None);
    }

    #[test]
    fn test_render_error_points_at_column() {
        use crate::errors::errors::{Error, ErrorImpl};
        use crate::Position;

        let error = Error::new(
            ErrorImpl::UnrecognisedToken {
                token: "$".to_string(),
            },
            Position::new(2, 16),
        );
        let rendered = super::render_error(
            &error,
            std::path::Path::new("BUILD"),
            "a = \"b\"\n    NAME = \"x\" $\n",
        );

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Error: UnrecognisedToken");
        assert_eq!(lines[1], "-> BUILD:2:16");
        assert_eq!(lines[3], "2 | NAME = \"x\" $");
        assert_eq!(lines[4], "  | -----------^");
    }
}

/// Renders an error against its source text.
///
/// ```text
/// Error: UnexpectedToken (expected `)`, found `]`)
/// -> BUILD:20:18
///    |
/// 20 | go_binary(name = ]
///    | -----------------^
/// ```
pub fn render_error(error: &Error, file: &Path, content: &str) -> String {
    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!(
        "-> {}:{}:{}\n",
        file.to_string_lossy(),
        position.line,
        position.column
    ));
    out.push_str(&format!("{:>padding$}\n", "|"));

    if let Some(line_text) = get_line(content, position.line) {
        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
        out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

        let arrows = (position.column as usize)
            .saturating_sub(removed_whitespace)
            .max(1);
        out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    out
}

pub fn display_error(error: &Error, file: &Path) {
    match fs::read_to_string(file) {
        Ok(content) => print!("{}", render_error(error, file, &content)),
        Err(_) => println!("Error: {} ({})", error.get_error_name(), error),
    }
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
