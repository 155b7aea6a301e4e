use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,

    /// A bare word directly followed by `(`.
    Func,
    /// A bare word: names, references and unquoted numbers alike.
    Identifier,
    /// A double-quoted string; the value holds the unescaped contents.
    Quote,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Assignment, // =
    Colon,
    Comma,
    Plus,

    // Reserved
    True,
    False,
}

impl TokenKind {
    /// How the token kind is spelled in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Error => "invalid token",
            TokenKind::Func => "function call",
            TokenKind::Identifier => "identifier",
            TokenKind::Quote => "string",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Assignment => "`=`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Plus => "`+`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// A token carrying no text, used for the parser's terminal sentinels.
    pub fn sentinel(kind: TokenKind, span: Span) -> Token {
        Token {
            kind,
            value: String::new(),
            span,
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
