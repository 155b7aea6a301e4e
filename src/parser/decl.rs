use crate::{
    ast::{
        ast::Value,
        declarations::{Func, ADDITION},
        values::Variable,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    parser::{Parser, State},
    value::{consume_func, consume_node},
};

pub fn parse_build(parser: &mut Parser) -> Option<State> {
    if parser.peek().kind != TokenKind::EOF {
        return Some(State::Decl);
    }

    None
}

pub fn parse_decl(parser: &mut Parser) -> Result<Option<State>, Error> {
    match parser.peek().kind {
        TokenKind::Func => {
            let func = consume_func(parser)?;
            tracing::debug!(name = %func.name, line = func.line, "parsed declaration");
            parser.document_mut().funcs.push(func);
            Ok(Some(State::Decl))
        }
        TokenKind::Identifier => Ok(Some(State::Var)),
        TokenKind::EOF => Ok(None),
        kind => {
            tracing::debug!(%kind, line = parser.peek().span.start.line, "no declaration starts here, stopping");
            Ok(None)
        }
    }
}

/// `identifier "=" value ( "+" term )*`
///
/// A `+` chain replaces the bound value with a synthetic `addition` call
/// whose positional parameters are the original value followed by every
/// term.
pub fn parse_var(parser: &mut Parser) -> Result<Option<State>, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assignment)?;

    let mut value = match parser.peek().kind {
        TokenKind::OpenBracket
        | TokenKind::Identifier
        | TokenKind::Quote
        | TokenKind::True
        | TokenKind::False => consume_node(parser)?,
        TokenKind::Func => Some(Value::from(consume_func(parser)?)),
        _ => None,
    };

    if parser.peek().kind == TokenKind::Plus {
        let Some(original) = value else {
            return Err(parser.unexpected_detailed(format!(
                "expected a value for `{}` before `+`",
                name.value
            )));
        };

        let mut addition = Func::new(
            ADDITION,
            parser.name(),
            name.span.start.line,
            name.span.start.column,
        );
        addition.anon_params.push(original);

        while parser.peek().kind == TokenKind::Plus {
            parser.advance();
            match parser.peek().kind {
                TokenKind::Identifier => {
                    let key = parser.advance().value;
                    addition.anon_params.push(Value::Variable(Variable::new(key)));
                }
                TokenKind::Quote => {
                    let text = parser.advance().value;
                    addition.anon_params.push(Value::Str(text));
                }
                _ => {
                    return Err(
                        parser.unexpected_detailed("expected an identifier or a string after `+`")
                    )
                }
            }
        }

        value = Some(addition.into());
    }

    tracing::debug!(name = %name.value, line = name.span.start.line, "parsed binding");
    parser.document_mut().vars.insert(name.value, value);

    Ok(Some(State::Decl))
}
