//! Parser driver for build files.
//!
//! The driver owns one token of lookahead (`peek`) and the last consumed
//! token (`cur`). Declarations are dispatched by a small state machine;
//! values nested inside a declaration are consumed recursively within a
//! single state.
//!
//! The first error wins. Once recorded, `cur` is forced to an error
//! sentinel and `peek` to end of input, so every later state terminates.

use crate::{
    ast::ast::File,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::spawn_tokenizer,
        tokens::{Token, TokenKind},
    },
};

use super::decl::{parse_build, parse_decl, parse_var};

/// States of the declaration loop. `None` from a step is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Build,
    Decl,
    Var,
}

pub struct Parser<'a> {
    /// Document name recorded on every parsed call
    name: String,
    /// Path stored on the resulting `File`
    path: String,
    tokens: Box<dyn Iterator<Item = Token> + 'a>,
    peek_tok: Token,
    cur_tok: Token,
    error: Option<Error>,
    /// Set once an error is recorded; the source is not pulled again
    halted: bool,
    /// Treat an exhausted source as truncated unless `EOF` was pulled
    require_eof: bool,
    seen_eof: bool,
    document: File,
}

impl<'a> Parser<'a> {
    /// Creates a parser over any token source.
    ///
    /// An exhausted source reads as end of input; see `require_eof`.
    pub fn new<I>(name: impl Into<String>, path: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        let path = path.into();
        Parser {
            name: name.into(),
            document: File::new(path.clone()),
            path,
            tokens: Box::new(tokens.into_iter()),
            peek_tok: Token::sentinel(TokenKind::EOF, Default::default()),
            cur_tok: Token::sentinel(TokenKind::EOF, Default::default()),
            error: None,
            halted: false,
            require_eof: false,
            seen_eof: false,
        }
    }

    /// Makes a source that ends without an `EOF` token an error.
    ///
    /// Used for channel sources, where a producer that dies mid-scan closes
    /// the channel early.
    pub fn require_eof(mut self) -> Self {
        self.require_eof = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lookahead token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.peek_tok
    }

    /// Returns the last consumed token.
    pub fn current(&self) -> &Token {
        &self.cur_tok
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub(crate) fn document_mut(&mut self) -> &mut File {
        &mut self.document
    }

    /// Shifts the lookahead into `cur`, pulls the next token and returns the
    /// consumed one.
    ///
    /// Pulling an `Error` token records an `UnrecognisedToken` error and
    /// halts the parser.
    pub fn advance(&mut self) -> Token {
        if self.halted {
            return self.peek_tok.clone();
        }

        let span = self.peek_tok.span;
        let mut truncated = false;
        let next = match self.tokens.next() {
            Some(token) => token,
            None => {
                truncated = self.require_eof && !self.seen_eof;
                Token::sentinel(TokenKind::EOF, span)
            }
        };
        if next.kind == TokenKind::EOF {
            self.seen_eof = true;
        }
        tracing::trace!(kind = %next.kind, value = %next.value, line = next.span.start.line, "token");

        let token = std::mem::replace(&mut self.peek_tok, next);
        self.cur_tok = token.clone();

        if truncated {
            self.fail(Error::new(ErrorImpl::TruncatedInput, span.end));
        } else if self.peek_tok.kind == TokenKind::Error {
            let bad = self.peek_tok.clone();
            self.fail(Error::new(
                ErrorImpl::UnrecognisedToken { token: bad.value },
                bad.span.start,
            ));
        }

        token
    }

    /// Records `error` unless an earlier one exists, then forces the
    /// terminal sentinels.
    pub fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            tracing::warn!(file = %self.name, "{}", error);
            self.error = Some(error);
        }

        let span = self.peek_tok.span;
        self.cur_tok = Token::sentinel(TokenKind::Error, span);
        self.peek_tok = Token::sentinel(TokenKind::EOF, span);
        self.halted = true;
    }

    /// Consumes the lookahead if it is of `expected_kind`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_tok.kind != expected_kind {
            return Err(self.unexpected(&[expected_kind]));
        }

        Ok(self.advance())
    }

    /// Checks, without consuming, that the lookahead is one of `kinds`.
    pub fn expect_one_of(&self, kinds: &[TokenKind]) -> Result<(), Error> {
        if self.peek_tok.is_one_of_many(kinds) {
            Ok(())
        } else {
            Err(self.unexpected(kinds))
        }
    }

    /// An `UnexpectedToken` error at the lookahead.
    pub fn unexpected(&self, expected: &[TokenKind]) -> Error {
        let expected = expected
            .iter()
            .map(TokenKind::describe)
            .collect::<Vec<_>>()
            .join(" or ");

        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.found(),
                expected,
            },
            self.peek_tok.span.start,
        )
    }

    /// An `UnexpectedTokenDetailed` error at the lookahead.
    pub fn unexpected_detailed(&self, message: impl Into<String>) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.found(),
                message: message.into(),
            },
            self.peek_tok.span.start,
        )
    }

    fn found(&self) -> String {
        match self.peek_tok.kind {
            TokenKind::EOF => String::from(TokenKind::EOF.describe()),
            _ => self.peek_tok.value.clone(),
        }
    }

    fn step(&mut self, state: State) -> Option<State> {
        let next = match state {
            State::Build => Ok(parse_build(self)),
            State::Decl => parse_decl(self),
            State::Var => parse_var(self),
        };

        match next {
            Ok(next) => next,
            Err(error) => {
                self.fail(error);
                None
            }
        }
    }

    fn run(&mut self) {
        self.advance();

        let mut state = Some(State::Build);
        while let Some(current) = state {
            state = self.step(current);
        }
    }

    /// Parses the whole token source into `target`.
    ///
    /// `target` is filled even when an error is returned; only declarations
    /// completed before the failing one are guaranteed to be well formed.
    pub fn decode(&mut self, target: &mut File) -> Result<(), Error> {
        self.document = std::mem::take(target);
        self.document.path = self.path.clone();

        self.run();

        *target = std::mem::take(&mut self.document);

        if self.cur_tok.kind == TokenKind::Error {
            if let Some(error) = &self.error {
                return Err(error.clone());
            }
        }

        Ok(())
    }
}

/// Parses a token stream into a `File`.
///
/// Returns the document built so far together with the outcome, so callers
/// can still inspect the declarations that preceded a failure.
pub fn parse<'a, I>(name: &str, path: &str, tokens: I) -> (File, Result<(), Error>)
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'a,
{
    let mut parser = Parser::new(name, path, tokens);
    let mut file = File::default();
    let result = parser.decode(&mut file);

    (file, result)
}

/// Scans `source` on a producer thread and parses the resulting stream.
///
/// A producer that stops before sending `EOF` fails the parse with
/// `TruncatedInput`.
pub fn parse_str(source: &str, name: &str, path: &str) -> (File, Result<(), Error>) {
    let tokens = spawn_tokenizer(source.to_string(), Some(name.to_string()));
    let mut parser = Parser::new(name, path, tokens).require_eof();
    let mut file = File::default();
    let result = parser.decode(&mut file);

    (file, result)
}
