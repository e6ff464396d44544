use crate::tokenizer::TokenKind;
use super::{
    ast::{BinOp, BinOpKind, Binary, Call, Expr, LitNum, LitSym, Literal, Paren, Unary, UnaryOpKind},
    error::{self, Error},
    Associativity,
    Parse,
    Parser,
    Precedence,
};

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        parse_expr(input, Precedence::Any)
    }
}

/// Parses an expression whose binary operators all have at least the given precedence.
fn parse_expr(input: &mut Parser, min_precedence: Precedence) -> Result<Expr, Error> {
    let mut lhs = parse_unary(input)?;

    loop {
        let Some(op) = peek_binary_op(input) else {
            break;
        };
        let precedence = op.kind.precedence();
        if precedence < min_precedence {
            break;
        }

        if !op.implicit {
            input.next_token()?;
        }

        let rhs_precedence = match op.kind.associativity() {
            Associativity::Left => precedence.next(),
            Associativity::Right => precedence,
        };
        let rhs = parse_expr(input, rhs_precedence)?;
        let span = lhs.span().start..rhs.span().end;
        lhs = Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        });
    }

    Ok(lhs)
}

/// Determines the binary operator that follows, if any, without consuming it. An operand directly
/// following another operand is an implicit multiplication.
fn peek_binary_op(input: &Parser) -> Option<BinOp> {
    let token = input.peek_token()?;
    let kind = match token.kind {
        TokenKind::Add => BinOpKind::Add,
        TokenKind::Sub => BinOpKind::Sub,
        TokenKind::Mul => BinOpKind::Mul,
        TokenKind::Div => BinOpKind::Div,
        TokenKind::Exp => BinOpKind::Exp,
        kind if kind.starts_operand() => {
            return Some(BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: token.span.start..token.span.start,
            });
        },
        _ => return None,
    };

    Some(BinOp {
        kind,
        implicit: false,
        span: token.span.clone(),
    })
}

/// Parses a negation, or a primary expression.
fn parse_unary(input: &mut Parser) -> Result<Expr, Error> {
    if let Some(token) = input.eat(TokenKind::Sub) {
        let operand = parse_expr(input, UnaryOpKind::Neg.precedence())?;
        let span = token.span.start..operand.span().end;
        return Ok(Expr::Unary(Unary {
            operand: Box::new(operand),
            op: UnaryOpKind::Neg,
            span,
        }));
    }

    parse_primary(input)
}

/// Parses a literal, a call, or a parenthesized expression.
fn parse_primary(input: &mut Parser) -> Result<Expr, Error> {
    let token = input.next_token()?;
    match token.kind {
        TokenKind::Int => Ok(Expr::Literal(Literal::Integer(LitNum {
            value: token.lexeme.to_owned(),
            span: token.span,
        }))),
        TokenKind::Float => Ok(Expr::Literal(Literal::Float(LitNum {
            value: token.lexeme.to_owned(),
            span: token.span,
        }))),
        TokenKind::Name => {
            let name = LitSym {
                name: token.lexeme.to_owned(),
                span: token.span,
            };

            // a call requires the parenthesis to follow the name immediately
            if input.current_token().is_some_and(|next| next.kind == TokenKind::OpenParen) {
                parse_call(input, name)
            } else {
                Ok(Expr::Literal(Literal::Symbol(name)))
            }
        },
        TokenKind::OpenParen => {
            let expr = parse_expr(input, Precedence::Any)?;
            match input.eat(TokenKind::CloseParen) {
                Some(close) => Ok(Expr::Paren(Paren {
                    expr: Box::new(expr),
                    span: token.span.start..close.span.end,
                })),
                None => Err(unclosed_or_unexpected(input, token.span)),
            }
        },
        TokenKind::CloseParen => Err(Error::new(
            vec![token.span],
            error::UnclosedParenthesis { opening: false },
        )),
        TokenKind::Symbol => Err(Error::new(
            vec![token.span],
            error::InvalidCharacter { lexeme: token.lexeme.to_owned() },
        )),
        found => Err(Error::new(vec![token.span], error::UnexpectedToken {
            expected: &[
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Name,
                TokenKind::OpenParen,
                TokenKind::Sub,
            ],
            found,
        })),
    }
}

/// Parses the parenthesized, comma-separated argument list of a call.
fn parse_call(input: &mut Parser, name: LitSym) -> Result<Expr, Error> {
    let open = input.next_token()?;
    if let Some(close) = input.eat(TokenKind::CloseParen) {
        return Err(Error::new(
            vec![open.span.start..close.span.end],
            error::EmptyArguments { name: name.name },
        ));
    }

    let mut args = vec![parse_expr(input, Precedence::Any)?];
    loop {
        if input.eat(TokenKind::Comma).is_some() {
            args.push(parse_expr(input, Precedence::Any)?);
        } else if let Some(close) = input.eat(TokenKind::CloseParen) {
            let span = name.span.start..close.span.end;
            return Ok(Expr::Call(Call {
                name,
                args,
                span,
                paren_span: open.span.start..close.span.end,
            }));
        } else {
            return Err(unclosed_or_unexpected(input, open.span));
        }
    }
}

/// Builds the error for a group that was not closed: either the input ended, or some other token
/// appeared where `)` was expected.
fn unclosed_or_unexpected(input: &Parser, open_span: std::ops::Range<usize>) -> Error {
    match input.peek_token() {
        None => Error::new(vec![open_span], error::UnclosedParenthesis { opening: true }),
        Some(token) if token.kind == TokenKind::Symbol => Error::new(
            vec![token.span.clone()],
            error::InvalidCharacter { lexeme: token.lexeme.to_owned() },
        ),
        Some(token) => Error::new(vec![token.span.clone()], error::UnexpectedToken {
            expected: &[TokenKind::CloseParen, TokenKind::Comma],
            found: token.kind,
        }),
    }
}
