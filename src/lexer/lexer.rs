use std::{
    sync::mpsc::{sync_channel, Receiver},
    thread,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).unwrap(),
        handler,
    }
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^#[^\n]*", skip_handler),
        pattern(r#"^"(?:[^"\\\n]|\\.)*""#, string_handler),
        pattern(r"^[A-Za-z0-9_][A-Za-z0-9_./\-@]*", symbol_handler),
        pattern(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
    ];
}

/// Incremental scanner over a build file.
///
/// Iterating a `Lexer` yields tokens on demand and always finishes with a
/// single `EOF` token. An unrecognised character is reported as an `Error`
/// token (its value is the character) and ends the stream.
pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: String,
    done: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file.unwrap_or_else(|| String::from("shell")),
            done: false,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn finish(&mut self) {
        let here = self.current_position();
        self.push(MK_TOKEN!(
            TokenKind::EOF,
            String::from("EOF"),
            Span {
                start: here,
                end: here
            }
        ));
        self.done = true;
    }

    /// Runs one pattern against the remaining input.
    fn step(&mut self) {
        if self.at_eof() {
            self.finish();
            return;
        }

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(self.remainder()) {
                (pattern.handler)(self, &pattern.regex);
                return;
            }
        }

        let start = self.current_position();
        let unrecognised = self.remainder().chars().next().unwrap_or_default();
        tracing::debug!(file = %self.file, line = start.line, column = start.column, "unrecognised character {:?}", unrecognised);
        self.advance_n(unrecognised.len_utf8());
        self.push(MK_TOKEN!(
            TokenKind::Error,
            unrecognised.to_string(),
            Span {
                start,
                end: self.current_position()
            }
        ));
        self.finish();
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.tokens.is_empty() && !self.done {
            self.step();
        }

        if self.tokens.is_empty() {
            None
        } else {
            Some(self.tokens.remove(0))
        }
    }
}

fn matched_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map_or(0, |m| m.end())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_len(lexer, regex);
    lexer.advance_n(matched);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_len(lexer, regex);
    let raw = lexer.remainder()[1..matched - 1].to_string();

    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => {
                    result.push(ch); // Keep unknown escapes verbatim
                    result.push(*other);
                }
                None => {
                    result.push(ch);
                    continue;
                }
            }
            chars.next();
        } else {
            result.push(ch);
        }
    }

    let start = lexer.current_position();
    lexer.advance_n(matched);
    lexer.push(MK_TOKEN!(
        TokenKind::Quote,
        result,
        Span {
            start,
            end: lexer.current_position()
        }
    ));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_len(lexer, regex);
    let value = lexer.remainder()[..matched].to_string();
    let is_call = lexer.remainder()[matched..].starts_with('(');

    let kind = if is_call {
        TokenKind::Func
    } else if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        *kind
    } else {
        TokenKind::Identifier
    };

    let start = lexer.current_position();
    lexer.advance_n(matched);
    lexer.push(MK_TOKEN!(
        kind,
        value,
        Span {
            start,
            end: lexer.current_position()
        }
    ));
}

/// Scans the whole source eagerly. The result always ends with `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    Lexer::new(source, file).collect()
}

/// Scans `source` on its own thread, handing tokens over a single-slot
/// channel. The receiver's blocking iterator is a token source for the
/// parser. The channel closes after `EOF`, or early if the scanner thread
/// dies; `Parser::require_eof` tells the two apart.
pub fn spawn_tokenizer(source: String, file: Option<String>) -> Receiver<Token> {
    let (sender, receiver) = sync_channel(1);

    thread::spawn(move || {
        for token in Lexer::new(source, file) {
            if sender.send(token).is_err() {
                // parser went away
                break;
            }
        }
    });

    receiver
}
