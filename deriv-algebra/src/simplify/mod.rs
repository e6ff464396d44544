//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which attempts to reduce an expression to a
//! canonical form. It does this by repeatedly applying rewriting rules to the expression in
//! multiple passes, until no more rules apply.
//!
//! The same engine drives three other transformations, each with its own rule set:
//!
//! - [`trigsimp`] rewrites trigonometric functions in terms of `sin` and `cos`, applies the
//! Pythagorean and double-angle identities, then rebuilds `tan`, `cot`, `sec` and `csc`.
//! - [`expand`] distributes products over sums, and multiplies out small integer powers of sums.
//! - [`factor`] combines a sum over a common denominator and pulls out common factors.

mod factor;
pub mod rules;

pub use factor::factor;
pub(crate) use crate::expr::{Expr, Primary};

/// A set of simplification rules applied together. See [`rules`].
pub type RuleSet = fn(&Expr) -> Option<Expr>;

/// Maximum number of passes over a single node.
///
/// Every rule set in [`rules`] reaches a fixed point well before this; the limit only exists so
/// that a pair of rules undoing each other cannot hang the caller.
const MAX_PASSES: usize = 256;

/// Base implementation of the simplification algorithm.
fn inner_simplify_with(expr: &Expr, rules: RuleSet) -> (Expr, bool) {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules(&expr) {
            expr = new_expr;
            changed_in_this_pass = true;
            changed_at_least_once = true;
        }

        // then begin recursing into the expression's children
        match expr {
            Expr::Primary(Primary::Call(_, ref mut args)) => {
                for arg in args.iter_mut() {
                    let result = inner_simplify_with(arg, rules);
                    *arg = result.0;
                    // use |= instead of = to not reset these variables to false if already true
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            Expr::Primary(_) => (),
            Expr::Add(ref mut children) | Expr::Mul(ref mut children) => {
                for child in children.iter_mut() {
                    let result = inner_simplify_with(child, rules);
                    *child = result.0;
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            Expr::Exp(ref mut lhs, ref mut rhs) => {
                let result_l = inner_simplify_with(lhs, rules);
                let result_r = inner_simplify_with(rhs, rules);

                **lhs = result_l.0;
                **rhs = result_r.0;
                changed_in_this_pass |= result_l.1 || result_r.1;
                changed_at_least_once |= result_l.1 || result_r.1;
            },
        }

        if !changed_in_this_pass {
            return (expr, changed_at_least_once);
        }
    }

    tracing::warn!(target: "simplify", expr = %expr, passes = MAX_PASSES, "no fixed point reached");
    (expr, changed_at_least_once)
}

/// Runs the given rule set to a fixed point.
fn run(expr: &Expr, rules: RuleSet) -> Expr {
    let (result, changed) = inner_simplify_with(expr, rules);
    if changed {
        tracing::trace!(target: "simplify", input = %expr, output = %result, "rewritten");
    }
    result
}

/// Simplify the given expression.
pub fn simplify(expr: &Expr) -> Expr {
    run(expr, rules::all)
}

/// Simplify the given expression using trigonometric identities.
///
/// `tan`, `cot`, `sec` and `csc` are first rewritten in terms of `sin` and `cos`, so that the
/// identities only need to be written once; afterwards, quotients and reciprocals of `sin` and
/// `cos` are turned back into those functions.
pub fn trigsimp(expr: &Expr) -> Expr {
    let rewritten = rules::trigonometry::to_sin_cos(expr);
    let identities = run(&rewritten, rules::trig_identities);
    run(&identities, rules::trig_recombine)
}

/// Expand the given expression, distributing products over sums.
pub fn expand(expr: &Expr) -> Expr {
    run(expr, rules::expand)
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        let expr = parse("0+0*(3x+5b^2)+0+(3a)").unwrap();
        assert_eq!(simplify(&expr), parse("3a").unwrap());
    }

    #[test]
    fn multiply_rules() {
        let expr = parse("1*3*1*1*1*(1+(x^2+5x+6)*0)*1*1").unwrap();
        assert_eq!(simplify(&expr), Expr::integer(3));
    }

    #[test]
    fn combine_like_factors() {
        let expr = parse("a * b * a^3 * b^4 * a^2").unwrap();
        assert_eq!(simplify(&expr), parse("a^6 b^5").unwrap());
    }

    #[test]
    fn cancel_factors() {
        let expr = parse("x^3 / x").unwrap();
        assert_eq!(simplify(&expr), parse("x^2").unwrap());

        let expr = parse("2x * 3 / (6 x)").unwrap();
        assert_eq!(simplify(&expr), Expr::one());
    }

    #[test]
    fn fractions_fold() {
        let expr = parse("1/2 + 1/3").unwrap();
        assert_eq!(simplify(&expr), Expr::number(crate::primitive::rational((5, 6))));
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplify(&parse("x + x").unwrap()), parse("2x").unwrap());
    }

    #[test]
    fn trig_double_angle() {
        let expr = parse("cos(x)*cos(x) + sin(x)*(-sin(x))").unwrap();
        assert_eq!(trigsimp(&expr), parse("cos(2x)").unwrap());
    }

    #[test]
    fn trig_quotient_to_tangent() {
        let expr = parse("sin(x)/cos(x)").unwrap();
        assert_eq!(trigsimp(&expr), parse("tan(x)").unwrap());

        let expr = parse("(cos(x)^2 + sin(x)^2)/cos(x)^2").unwrap();
        assert_eq!(trigsimp(&expr), parse("sec(x)^2").unwrap());
    }

    #[test]
    fn trig_secant_tangent() {
        let expr = parse("sin(x)/cos(x)^2").unwrap();
        assert_eq!(trigsimp(&expr), parse("tan(x) sec(x)").unwrap());
    }

    #[test]
    fn expand_square() {
        let expr = parse("(x+1)^2").unwrap();
        assert_eq!(expand(&expr), parse("x^2 + 2x + 1").unwrap());
    }
}
