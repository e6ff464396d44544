//! Simplification rules for powers.

use crate::{
    primitive::{exact_root, is_integer, is_negative, pow_int, to_i32},
    simplify::rules::do_power,
};
use super::Expr;

/// `a^0 = 1`
pub fn power_zero(expr: &Expr) -> Option<Expr> {
    do_power(expr, |_, rhs| rhs.is_zero().then(Expr::one))
}

/// `0^a = 0`, for positive numbers `a`
pub fn power_zero_left(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        let positive = rhs.as_number().is_some_and(|n| !is_negative(n));
        (lhs.is_zero() && positive).then(Expr::zero)
    })
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, _| lhs.is_one().then(Expr::one))
}

/// `a^1 = a`
pub fn power_one(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| rhs.is_one().then(|| lhs.clone()))
}

/// Evaluates powers of numbers when the result is exact.
///
/// `2^3 = 8`
/// `2^-1 = 1/2`
/// `(4/9)^(1/2) = 2/3`
pub fn evaluate_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_number()?;

        if is_integer(exp) {
            return pow_int(base, to_i32(exp)?).map(Expr::number);
        }

        let root = exp.denom().to_u32()?;
        let power = exp.numer().to_i32()?;
        let base = exact_root(base, root)?;
        pow_int(&base, power).map(Expr::number)
    })
}

/// `(a^b)^c = a^(b*c)`, for integer `c`
pub fn power_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        if !rhs.as_number().is_some_and(is_integer) {
            return None;
        }

        let Expr::Exp(base, inner) = lhs else {
            return None;
        };
        Some(Expr::pow((**base).clone(), (**inner).clone() * rhs.clone()))
    })
}

/// `(a*b)^c = a^c*b^c`, for integer `c`
pub fn distribute_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        if !rhs.as_number().is_some_and(is_integer) {
            return None;
        }

        let Expr::Mul(factors) = lhs else {
            return None;
        };
        Some(Expr::Mul(
            factors.iter()
                .map(|factor| Expr::pow(factor.clone(), rhs.clone()))
                .collect(),
        ))
    })
}

/// `e^log(a) = a`
/// `e^(k*log(a)) = a^k`
pub fn exp_log(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        if lhs.as_symbol() != Some("e") {
            return None;
        }

        if let Some(arg) = rhs.as_unary_call("log") {
            return Some(arg.clone());
        }

        let (coeff, rest) = rhs.as_coeff_factors();
        match rest.as_slice() {
            [log] => log.as_unary_call("log")
                .map(|arg| Expr::pow(arg.clone(), Expr::number(coeff))),
            _ => None,
        }
    })
}

/// Applies all power rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    power_zero(expr)
        .or_else(|| power_zero_left(expr))
        .or_else(|| power_one_left(expr))
        .or_else(|| power_one(expr))
        .or_else(|| evaluate_power(expr))
        .or_else(|| power_power(expr))
        .or_else(|| distribute_power(expr))
        .or_else(|| exp_log(expr))
}

#[cfg(test)]
mod tests {
    use crate::{parse, primitive::rational};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_powers() {
        assert_eq!(evaluate_power(&parse("2^3").unwrap()), Some(Expr::integer(8)));

        let half = Expr::number(rational((1, 2)));
        let root = Expr::pow(Expr::number(rational((4, 9))), half.clone());
        assert_eq!(evaluate_power(&root), Some(Expr::number(rational((2, 3)))));

        let irrational = Expr::pow(Expr::integer(2), half);
        assert_eq!(evaluate_power(&irrational), None);
    }

    #[test]
    fn nested_powers() {
        let half = Expr::number(rational((1, 2)));
        let expr = Expr::pow(Expr::pow(Expr::symbol("x"), half), Expr::integer(2));
        let result = power_power(&expr).unwrap();
        assert_eq!(result, Expr::pow(
            Expr::symbol("x"),
            Expr::integer(1),
        ));

        // the outer exponent must be an integer
        assert_eq!(power_power(&parse("(x^2)^(1/2)").unwrap()), None);
    }

    #[test]
    fn exp_of_log() {
        assert_eq!(exp_log(&parse("e^ln(x)").unwrap()), Some(Expr::symbol("x")));
        assert_eq!(
            exp_log(&parse("e^(2 log(x))").unwrap()),
            Some(parse("x^2").unwrap()),
        );
    }
}
