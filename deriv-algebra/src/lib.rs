//! Symbolic algebra used by the derivative explainer.
//!
//! The central type is [`Expr`], a flattened representation of a mathematical expression with
//! exact rational numbers. On top of it, this crate provides:
//!
//! - [`simplify`], [`trigsimp`], [`expand`] and [`factor`], the simplification primitives;
//! - [`derivative`], a total native differentiator;
//! - plain-text ([`std::fmt::Display`]) and [`Latex`] rendering;
//! - numeric evaluation through [`numerical::Ctxt`].

pub mod derivative;
pub mod expr;
pub mod numerical;
pub mod primitive;
pub mod simplify;

pub use derivative::derivative;
pub use expr::{fresh::FreshSymbols, latex::Latex, Expr, Primary};
pub use simplify::{expand, factor, simplify, trigsimp};

/// Parses the input and converts it into an [`Expr`].
pub fn parse(input: &str) -> Result<Expr, deriv_parser::parser::error::Error> {
    deriv_parser::parse_expr(input).map(Expr::from)
}
