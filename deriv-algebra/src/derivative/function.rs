//! Symbolic derivatives of the known functions.

use crate::{expr::Expr, primitive::rational};
use super::{derivative, MultBuilder};

/// `1 - u^2` or `1 + u^2`.
fn one_plus_square(u: &Expr, sign: i64) -> Expr {
    Expr::Add(vec![
        Expr::one(),
        Expr::Mul(vec![Expr::integer(sign), Expr::pow(u.clone(), Expr::integer(2))]),
    ])
}

/// Computes the derivative of a function call and performs the chain rule.
///
/// `call` is the whole call expression, used for unevaluated derivatives of undefined functions.
pub(super) fn function_derivative(call: &Expr, func: &str, args: &[Expr], with: &str) -> Expr {
    let mut mult_group = MultBuilder::default();
    let unary = |name: &str, u: &Expr| Expr::call(name, vec![u.clone()]);

    match (func, args) {
        ("sin", [u]) => {
            mult_group.mult(unary("cos", u));
        },
        ("cos", [u]) => {
            mult_group.mult(Expr::integer(-1));
            mult_group.mult(unary("sin", u));
        },
        ("tan", [u]) => {
            mult_group.mult(Expr::pow(unary("sec", u), Expr::integer(2)));
        },
        ("cot", [u]) => {
            mult_group.mult(Expr::integer(-1));
            mult_group.mult(Expr::pow(unary("csc", u), Expr::integer(2)));
        },
        ("sec", [u]) => {
            mult_group.mult(unary("sec", u));
            mult_group.mult(unary("tan", u));
        },
        ("csc", [u]) => {
            mult_group.mult(Expr::integer(-1));
            mult_group.mult(unary("csc", u));
            mult_group.mult(unary("cot", u));
        },
        ("asin", [u]) => {
            mult_group.mult(Expr::pow(one_plus_square(u, -1), Expr::number(rational((-1, 2)))));
        },
        ("acos", [u]) => {
            mult_group.mult(Expr::integer(-1));
            mult_group.mult(Expr::pow(one_plus_square(u, -1), Expr::number(rational((-1, 2)))));
        },
        ("atan", [u]) => {
            mult_group.mult(Expr::recip(one_plus_square(u, 1)));
        },
        ("log", [u]) => {
            mult_group.mult(Expr::recip(u.clone()));
        },
        ("log", [u, base]) => {
            if base.contains_symbol(with) {
                // log_b(u) = ln(u) / ln(b)
                let quotient = unary("log", u) * Expr::recip(unary("log", base));
                return derivative(&quotient, with);
            }

            mult_group.mult(Expr::recip(u.clone()));
            mult_group.mult(Expr::recip(unary("log", base)));
        },
        _ => return Expr::derivative_of(call.clone(), with),
    }

    // chain rule
    if let Some(u) = args.first() {
        mult_group.mult(derivative(u, with));
    }
    mult_group.into()
}
