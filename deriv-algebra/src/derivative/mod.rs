//! Native symbolic differentiation.
//!
//! [`derivative`] is total: every expression has a derivative. Applications of undefined
//! functions, such as `f(x)`, differentiate to an unevaluated `Derivative(f(x), x)` node. The
//! result is not simplified.

mod function;

use crate::primitive::{is_one, is_zero};
use super::expr::{Expr, Primary};

/// Returns `true` if the given [`Expr`] is "clearly" zero. This is intended to clean up ASTs
/// and is not mathematically rigorous.
fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Number(n)) => is_zero(n),
        Expr::Add(sum) => sum.iter().all(is_trivially_zero),
        Expr::Mul(mul) => mul.iter().any(is_trivially_zero),
        Expr::Exp(base, exponent) => is_trivially_zero(base) && exponent.as_number().is_some_and(|n| n.cmp0().is_gt()),
        _ => false,
    }
}

/// Returns `true` if the given [`Expr`] is "clearly" one. This is intended to clean up ASTs and
/// is not mathematically rigorous.
fn is_trivially_unity(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Number(n)) => is_one(n),
        Expr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        Expr::Exp(expr, expr1) => expr1.is_zero() || is_trivially_unity(expr),
        Expr::Add(expr) => expr.len() == 1 && is_trivially_unity(&expr[0]),
        _ => false
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<Expr>);

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        Expr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: Expr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![Expr::zero()];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        Expr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[Expr], with: &str) -> Expr {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, with));
    }
    sum.into()
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[Expr], with: &str) -> Expr {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, with));
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    outer_sum.into()
}

/// Returns `exp - 1`, folding numbers.
fn decrement(exp: &Expr) -> Expr {
    match exp.as_number() {
        Some(n) => Expr::number(n.clone() - 1),
        None => exp.clone() + Expr::integer(-1),
    }
}

/// Differentiates `base^exp`.
fn power_rule(base: &Expr, exp: &Expr, with: &str) -> Expr {
    let mut mult_group = MultBuilder::default();

    if !exp.contains_symbol(with) {
        // (f^n)' = n * f^(n-1) * f'
        mult_group.mult(exp.clone());
        mult_group.mult(Expr::pow(base.clone(), decrement(exp)));
        mult_group.mult(derivative(base, with));
    } else if !base.contains_symbol(with) {
        // (a^g)' = a^g * ln(a) * g'
        mult_group.mult(Expr::pow(base.clone(), exp.clone()));
        if base.as_symbol() != Some("e") {
            mult_group.mult(Expr::call("log", vec![base.clone()]));
        }
        mult_group.mult(derivative(exp, with));
    } else {
        // (f^g)' = f^g * (g' * ln(f) + g * f' / f)
        let mut sum = SumBuilder::default();
        let mut log_term = MultBuilder::default();
        log_term.mult(derivative(exp, with));
        log_term.mult(Expr::call("log", vec![base.clone()]));
        sum.add(log_term.into());

        let mut ratio_term = MultBuilder::default();
        ratio_term.mult(exp.clone());
        ratio_term.mult(derivative(base, with));
        ratio_term.mult(Expr::recip(base.clone()));
        sum.add(ratio_term.into());

        mult_group.mult(Expr::pow(base.clone(), exp.clone()));
        mult_group.mult(sum.into());
    }

    mult_group.into()
}

/// Computes the derivative of the given expression with respect to the given symbol.
pub fn derivative(f: &Expr, with: &str) -> Expr {
    if !f.contains_symbol(with) {
        return Expr::zero();
    }

    let expr = match f {
        Expr::Primary(Primary::Number(_)) => Expr::zero(),
        Expr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                Expr::one()
            } else {
                Expr::zero()
            }
        },
        Expr::Primary(Primary::Call(func, args)) => function::function_derivative(f, func, args, with),
        Expr::Add(exprs) => sum_rule(exprs, with),
        Expr::Mul(exprs) => product_rule(exprs, with),
        Expr::Exp(base, exp) => power_rule(base, exp, with),
    };

    if is_trivially_zero(&expr) {
        Expr::zero()
    } else {
        expr
    }
}
