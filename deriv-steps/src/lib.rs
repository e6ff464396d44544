//! Step-by-step explanations of symbolic derivatives.
//!
//! An expression is explained in three stages:
//!
//! 1. [`build`] chooses a differentiation rule for the expression, and recursively for its
//!    parts, producing a [`Derivation`] tree that records *how* the derivative is found.
//! 2. [`evaluate`] computes the derivative that a tree describes.
//! 3. [`render`] walks the tree and writes a [`Document`] of English steps, finishing with the
//!    answer simplified by a [`SimplifyCascade`]. Documents are written as plain text or HTML
//!    through a [`Format`].
//!
//! [`explain`] runs all three stages and writes the result in the [`OutputFormat`] of its
//! [`ExplainOptions`]. [`tangent_line`], [`explain_higher`] and [`explain_batch`] build on it.
//!
//! ```
//! use deriv_algebra::parse;
//! use deriv_steps::{explain, ExplainOptions};
//!
//! let expr = parse("x^3").unwrap();
//! let explanation = explain(&expr, "x", &ExplainOptions::default());
//! assert_eq!(explanation.answer().to_string(), "3*x^2");
//! ```
//!
//! # Feature flags
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for [`OutputFormat`].

pub mod batch;
pub mod build;
pub mod eval;
pub mod explain;
pub mod finalize;
pub mod notation;
pub mod options;
pub mod render;
pub mod select;
pub mod tree;

pub use batch::{explain_batch, Request};
pub use build::build;
pub use eval::evaluate;
pub use explain::{explain, explain_higher, tangent_line, Explanation, TangentError, TangentFunction, TangentLine};
pub use finalize::{NamedPass, SimplifyCascade};
pub use notation::normalize_notation;
pub use options::{ExplainOptions, ExplainOptionsBuilder, OutputFormat};
pub use render::{render, render_with, Block, Document, Format, HtmlFormat, PlainFormat};
pub use tree::{Derivation, Rule};
