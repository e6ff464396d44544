//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply.

pub mod add;
pub mod call;
pub mod distribute;
pub mod multiply;
pub mod power;
pub mod trigonometry;

use super::{Expr, Primary};

/// If the expression is a function call with the given function name, calls the given
/// transformation function with the arguments.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(
    expr: &Expr,
    name: &str,
    f: impl FnOnce(&[Expr]) -> Option<Expr>,
) -> Option<Expr> {
    if let Expr::Primary(Primary::Call(target_name, args)) = expr {
        if target_name == name {
            return f(args);
        }
    }

    None
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the left
/// and right-hand-side of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Exp(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// Applies all rules used by [`simplify`](super::simplify).
pub fn all(expr: &Expr) -> Option<Expr> {
    add::all(expr)
        .or_else(|| multiply::all(expr))
        .or_else(|| power::all(expr))
        .or_else(|| call::all(expr))
}

/// Applies the distribution rules before all other rules, used by [`expand`](super::expand).
pub fn expand(expr: &Expr) -> Option<Expr> {
    distribute::all(expr)
        .or_else(|| all(expr))
}

/// Applies all rules together with the Pythagorean and double-angle identities.
pub fn trig_identities(expr: &Expr) -> Option<Expr> {
    all(expr)
        .or_else(|| trigonometry::identities(expr))
}

/// Applies all rules together with the rules that rebuild `tan`, `cot`, `sec` and `csc`.
pub fn trig_recombine(expr: &Expr) -> Option<Expr> {
    all(expr)
        .or_else(|| trigonometry::recombine(expr))
}
