use deriv_algebra::{expr::make_fraction, Expr};
use crate::tree::{Derivation, Rule};
use super::Builder;

/// `name(arg)`
fn unary(name: &str, arg: &Expr) -> Expr {
    Expr::call(name, vec![arg.clone()])
}

/// The forms of a trigonometric function written with simpler functions, which can be
/// differentiated instead of the function itself.
fn rewrites(name: &str, arg: &Expr) -> Vec<Expr> {
    match name {
        "tan" => vec![make_fraction(unary("sin", arg), unary("cos", arg))],
        "csc" => vec![Expr::recip(unary("sin", arg))],
        "sec" => vec![Expr::recip(unary("cos", arg))],
        "cot" => vec![
            Expr::recip(unary("tan", arg)),
            make_fraction(unary("cos", arg), unary("sin", arg)),
        ],
        _ => Vec::new(),
    }
}

impl Builder<'_> {
    /// Builds the derivation of a trigonometric function.
    ///
    /// `sin` and `cos` are differentiated directly. The other functions offer the direct
    /// derivative as the canonical method, and their rewritten forms as alternatives.
    pub(super) fn trig(&mut self, expr: &Expr, name: &str, argument: &Expr) -> Derivation {
        let canonical = if argument.as_symbol() == Some(self.symbol) {
            self.node(expr, Rule::Trig { function: expr.clone() })
        } else {
            self.chain(expr, argument, |u| {
                let function = unary(name, &u);
                (function.clone(), Rule::Trig { function })
            })
        };

        let rewrites = rewrites(name, argument);
        if rewrites.is_empty() {
            return canonical;
        }

        let mut candidates = vec![canonical];
        for rewritten in rewrites {
            let substep = self.build(&rewritten);
            candidates.push(self.node(expr, Rule::Rewrite {
                rewritten,
                substep: Box::new(substep),
            }));
        }
        self.node(expr, Rule::Alternative { candidates })
    }
}
