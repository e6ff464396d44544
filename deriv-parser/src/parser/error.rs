//! The kinds of errors that can occur while parsing.

use ariadne::Fmt;
use deriv_error::{impl_error_kind, EXPR};
use crate::tokenizer::TokenKind;

pub use deriv_error::Error;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedEof;

impl_error_kind!(UnexpectedEof, |this| {
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
});

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedEof;

impl_error_kind!(ExpectedEof, |this| {
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
});

/// An unexpected token was encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

impl_error_kind!(UnexpectedToken, |this| {
    message = "unexpected token",
    labels = [format!(
        "expected one of: {}",
        this.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "),
    )],
    help = format!("found {:?}", this.found),
});

/// A parenthesis was not closed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

impl_error_kind!(UnclosedParenthesis, |this| {
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if this.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
});

/// A character that is not part of the notation was found.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidCharacter {
    /// The offending character(s).
    pub lexeme: String,
}

impl_error_kind!(InvalidCharacter, |this| {
    message = format!("invalid character `{}`", this.lexeme),
    labels = ["here"],
    help = format!(
        "expressions may only use numbers, names, parentheses, commas and the operators {}",
        "+ - * / ^".fg(EXPR),
    ),
});

/// A function was called without any arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyArguments {
    /// The name of the function.
    pub name: String,
}

impl_error_kind!(EmptyArguments, |this| {
    message = format!("missing argument for `{}`", this.name),
    labels = ["add an expression here"],
});
