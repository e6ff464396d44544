//! A format-neutral representation of a rendered explanation.

use deriv_algebra::{Expr, Latex};

/// A piece of mathematics, in both LaTeX and plain-text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Math {
    /// The LaTeX source.
    pub latex: String,

    /// The plain-text rendering.
    pub plain: String,
}

impl Math {
    /// An expression.
    pub fn expr(expr: &Expr) -> Self {
        Self {
            latex: expr.to_latex(),
            plain: expr.to_string(),
        }
    }

    /// The equation `lhs = rhs`.
    pub fn eq(lhs: &Expr, rhs: &Expr) -> Self {
        Self {
            latex: format!("{} = {}", lhs.to_latex(), rhs.to_latex()),
            plain: format!("{} = {}", lhs, rhs),
        }
    }

    /// Mathematics written by hand.
    pub fn raw(latex: impl Into<String>, plain: impl Into<String>) -> Self {
        Self {
            latex: latex.into(),
            plain: plain.into(),
        }
    }
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Prose.
    Text(String),

    /// Inline mathematics.
    Math(Math),
}

impl Span {
    /// Creates a span of prose.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a span of inline mathematics for the expression.
    pub fn expr(expr: &Expr) -> Self {
        Self::Math(Math::expr(expr))
    }

    /// Creates a span of inline mathematics for the equation `lhs = rhs`.
    pub fn eq(lhs: &Expr, rhs: &Expr) -> Self {
        Self::Math(Math::eq(lhs, rhs))
    }
}

/// A block of an explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A paragraph of prose and inline mathematics.
    Text(Vec<Span>),

    /// Displayed mathematics, on its own line.
    Math(Math),

    /// The title of a collapsible section.
    Header(String),

    /// One step of the explanation.
    Step(Vec<Block>),

    /// Steps nested one level deeper than the enclosing ones.
    Level(Vec<Block>),

    /// A section that can be hidden, used for alternative methods.
    Collapsible(Vec<Block>),
}

impl Block {
    /// A paragraph made of a single piece of prose.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(vec![Span::text(text)])
    }

    /// Displayed mathematics for the expression.
    pub fn expr(expr: &Expr) -> Self {
        Self::Math(Math::expr(expr))
    }

    /// Displayed mathematics for the equation `lhs = rhs`.
    pub fn eq(lhs: &Expr, rhs: &Expr) -> Self {
        Self::Math(Math::eq(lhs, rhs))
    }
}

/// A complete explanation of a derivative.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The steps of the explanation, including the final simplification, if any.
    pub steps: Vec<Block>,

    /// The closing block stating the answer.
    pub conclusion: Vec<Block>,

    /// The derivative as evaluated from the derivation tree.
    pub derivative: Expr,

    /// The answer: the derivative after the simplification cascade.
    pub answer: Expr,
}

impl Document {
    /// Counts the blocks of the document, at any depth, for which the predicate holds.
    pub fn count(&self, predicate: impl Fn(&Block) -> bool) -> usize {
        fn count_in(blocks: &[Block], predicate: &dyn Fn(&Block) -> bool) -> usize {
            blocks.iter()
                .map(|block| {
                    let nested = match block {
                        Block::Step(children) | Block::Level(children) | Block::Collapsible(children) => {
                            count_in(children, predicate)
                        },
                        Block::Text(_) | Block::Math(_) | Block::Header(_) => 0,
                    };
                    usize::from(predicate(block)) + nested
                })
                .sum()
        }

        count_in(&self.steps, &predicate) + count_in(&self.conclusion, &predicate)
    }
}
