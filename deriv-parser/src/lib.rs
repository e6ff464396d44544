//! Tokenizer and parser for plain-text math notation such as `3x^2 + sin(x)cos(x)`.
//!
//! The entry point is [`parser::Parser`]; [`parse_expr`] is a shortcut for parsing a complete
//! expression.

pub mod parser;
pub mod tokenizer;

use deriv_error::Error;
use parser::{ast::Expr, Parser};

/// Parses the whole input as a single expression.
pub fn parse_expr(input: &str) -> Result<Expr, Error> {
    Parser::new(input).try_parse_full::<Expr>()
}
