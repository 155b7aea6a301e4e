use crate::{
    ast::{ast::Value, declarations::Func, values::Variable},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Consumes a single value, or returns `None` without consuming anything
/// when the lookahead cannot start one.
///
/// Bare words are always variable references: `1` is `Variable("1")`.
pub fn consume_node(parser: &mut Parser) -> Result<Option<Value>, Error> {
    let value = match parser.peek().kind {
        TokenKind::Quote => Value::Str(parser.advance().value),
        TokenKind::OpenBracket => Value::Slice(consume_slice(parser)?),
        TokenKind::Func => Value::from(consume_func(parser)?),
        TokenKind::True => {
            parser.advance();
            Value::Bool(true)
        }
        TokenKind::False => {
            parser.advance();
            Value::Bool(false)
        }
        TokenKind::Identifier => Value::Variable(Variable::new(parser.advance().value)),
        _ => return Ok(None),
    };

    Ok(Some(value))
}

/// `name "(" params`
///
/// When the parameter list stops at a token it cannot place, the closing
/// `)` is required here, so `name()` is an empty call and anything else
/// is an unexpected token at this call site.
pub fn consume_func(parser: &mut Parser) -> Result<Func, Error> {
    let name = parser.expect(TokenKind::Func)?;
    let mut func = Func::new(
        name.value,
        parser.name(),
        name.span.start.line,
        name.span.start.column,
    );

    parser.expect(TokenKind::OpenParen)?;
    if !consume_params(parser, &mut func)? {
        parser.expect(TokenKind::CloseParen)?;
    }

    Ok(func)
}

/// Fills `func` with positional and named parameters.
///
/// Returns `true` once the closing `)` was consumed (a single trailing
/// comma is tolerated) and `false` when the list stopped at a token that
/// cannot start a parameter.
///
/// `name: ` is an annotation marker: it is accepted and dropped, and the
/// next parameter may follow it directly.
pub fn consume_params(parser: &mut Parser, func: &mut Func) -> Result<bool, Error> {
    loop {
        match parser.peek().kind {
            TokenKind::Quote | TokenKind::OpenBracket | TokenKind::Func => {
                if let Some(value) = consume_node(parser)? {
                    func.anon_params.push(value);
                }
            }
            TokenKind::Identifier => {
                let name = parser.advance();
                match parser.peek().kind {
                    TokenKind::Assignment => {
                        parser.advance();
                        let Some(value) = consume_node(parser)? else {
                            return Err(parser.unexpected_detailed(format!(
                                "expected a value for parameter `{}`",
                                name.value
                            )));
                        };
                        func.params.insert(name.value, value);
                    }
                    TokenKind::Colon => {
                        parser.advance();
                        if !parser
                            .peek()
                            .is_one_of_many(&[TokenKind::Comma, TokenKind::CloseParen])
                        {
                            continue;
                        }
                    }
                    _ => func
                        .anon_params
                        .push(Value::Variable(Variable::new(name.value))),
                }
            }
            _ => return Ok(false),
        }

        parser.expect_one_of(&[TokenKind::CloseParen, TokenKind::Comma])?;
        if parser.advance().kind == TokenKind::CloseParen {
            return Ok(true);
        }

        // trailing comma
        if parser.peek().kind == TokenKind::CloseParen {
            parser.advance();
            return Ok(true);
        }
    }
}

/// `"[" element ( "," element )* "]"`
///
/// Elements are kept as the raw text of their tokens. Unlike parameter
/// lists, a trailing comma is rejected.
pub fn consume_slice(parser: &mut Parser) -> Result<Vec<Value>, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let mut slice = vec![];
    while parser.peek().kind != TokenKind::CloseBracket {
        if parser
            .peek()
            .is_one_of_many(&[TokenKind::EOF, TokenKind::Error])
        {
            return Err(parser.unexpected(&[TokenKind::CloseBracket]));
        }

        slice.push(Value::Str(parser.advance().value));

        match parser.peek().kind {
            TokenKind::Comma => {
                parser.advance();
                if parser.peek().kind == TokenKind::CloseBracket {
                    return Err(parser.unexpected_detailed("trailing comma is not allowed in a list"));
                }
            }
            TokenKind::CloseBracket => {}
            _ => return Err(parser.unexpected(&[TokenKind::Comma, TokenKind::CloseBracket])),
        }
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(slice)
}
