//! Trigonometric identities used by [`trigsimp`](crate::simplify::trigsimp).
//!
//! Trigonometric simplification happens in three phases:
//!
//! 1. [`to_sin_cos`] rewrites `tan`, `cot`, `sec` and `csc` in terms of `sin` and `cos`.
//! 2. [`identities`] applies the Pythagorean and double-angle identities.
//! 3. [`recombine`] turns quotients and reciprocals of `sin` and `cos` back into `tan`, `cot`,
//!    `sec` and `csc`.

use crate::{
    primitive::{is_integer, is_negative, rational, to_i32},
    simplify::rules::{add::with_coeff, do_add, do_multiply, do_power},
};
use rug::Rational;
use super::{Expr, Primary};

/// Rewrites every `tan`, `cot`, `sec` and `csc` call in the expression in terms of `sin` and
/// `cos`.
///
/// `tan(a) = sin(a)/cos(a)`
/// `cot(a) = cos(a)/sin(a)`
/// `sec(a) = 1/cos(a)`
/// `csc(a) = 1/sin(a)`
pub fn to_sin_cos(expr: &Expr) -> Expr {
    match expr {
        Expr::Primary(Primary::Call(name, args)) => {
            let args = args.iter().map(to_sin_cos).collect::<Vec<_>>();
            let arg = match args.as_slice() {
                [arg] => arg.clone(),
                _ => return Expr::call(name.clone(), args),
            };

            let sin = Expr::call("sin", vec![arg.clone()]);
            let cos = Expr::call("cos", vec![arg]);
            match name.as_str() {
                "tan" => Expr::Mul(vec![sin, Expr::recip(cos)]),
                "cot" => Expr::Mul(vec![cos, Expr::recip(sin)]),
                "sec" => Expr::recip(cos),
                "csc" => Expr::recip(sin),
                _ => Expr::call(name.clone(), args),
            }
        },
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => Expr::Add(terms.iter().map(to_sin_cos).collect()),
        Expr::Mul(factors) => Expr::Mul(factors.iter().map(to_sin_cos).collect()),
        Expr::Exp(base, exp) => Expr::pow(to_sin_cos(base), to_sin_cos(exp)),
    }
}

/// If the factor is `name(a)^2`, returns `a`.
fn square_of<'a>(factor: &'a Expr, name: &str) -> Option<&'a Expr> {
    match factor {
        Expr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n == 2) => base.as_unary_call(name),
        _ => None,
    }
}

/// Splits a term of the form `c*name(a)^2*rest` into `(c, a, rest)`.
fn split_square(term: &Expr, name: &str) -> Option<(Rational, Expr, Vec<Expr>)> {
    let (coeff, mut rest) = term.as_coeff_factors();
    let idx = rest.iter().position(|factor| square_of(factor, name).is_some())?;
    let square = rest.remove(idx);
    let arg = square_of(&square, name)?.clone();
    Some((coeff, arg, rest))
}

/// Replaces the terms at `i` and `j` with the given term.
fn replace_pair(terms: &[Expr], i: usize, j: usize, replacement: Expr) -> Expr {
    let mut new_terms = terms.iter()
        .enumerate()
        .filter(|(idx, _)| *idx != i && *idx != j)
        .map(|(_, term)| term.clone())
        .collect::<Vec<_>>();
    new_terms.push(replacement);
    Expr::Add(new_terms).downgrade()
}

/// `c*sin(a)^2 + c*cos(a)^2 = c`
/// `c*cos(a)^2 - c*sin(a)^2 = c*cos(2a)`
///
/// Any common factors of the two terms are kept.
pub fn pythagorean(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        for (i, sin_term) in terms.iter().enumerate() {
            let Some((sin_coeff, sin_arg, sin_rest)) = split_square(sin_term, "sin") else {
                continue;
            };

            for (j, cos_term) in terms.iter().enumerate() {
                let Some((cos_coeff, cos_arg, cos_rest)) = split_square(cos_term, "cos") else {
                    continue;
                };
                if i == j || sin_arg != cos_arg || Expr::Mul(sin_rest.clone()) != Expr::Mul(cos_rest) {
                    continue;
                }

                if sin_coeff == cos_coeff {
                    return Some(replace_pair(terms, i, j, with_coeff(cos_coeff, sin_rest)));
                }

                if sin_coeff == Rational::from(-&cos_coeff) {
                    let double = Expr::call("cos", vec![Expr::integer(2) * sin_arg]);
                    let mut factors = vec![double];
                    factors.extend(sin_rest);
                    return Some(replace_pair(terms, i, j, with_coeff(cos_coeff, factors)));
                }
            }
        }

        None
    })
}

/// `c - c*sin(a)^2 = c*cos(a)^2`
/// `c - c*cos(a)^2 = c*sin(a)^2`
pub fn pythagorean_complement(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        for (i, term) in terms.iter().enumerate() {
            let (coeff, rest) = term.as_coeff_factors();
            let rest = Expr::Mul(rest);

            for (j, other) in terms.iter().enumerate() {
                if i == j {
                    continue;
                }

                for (name, complement) in [("sin", "cos"), ("cos", "sin")] {
                    let Some((other_coeff, arg, other_rest)) = split_square(other, name) else {
                        continue;
                    };
                    if other_coeff != Rational::from(-&coeff) || Expr::Mul(other_rest.clone()) != rest {
                        continue;
                    }

                    let square = Expr::pow(Expr::call(complement, vec![arg]), Expr::integer(2));
                    let mut factors = vec![square];
                    factors.extend(other_rest);
                    return Some(replace_pair(terms, i, j, with_coeff(coeff, factors)));
                }
            }
        }

        None
    })
}

/// `sin(a)*cos(a) = sin(2a)/2`
pub fn double_angle(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let (i, arg) = factors.iter()
            .enumerate()
            .find_map(|(i, factor)| factor.as_unary_call("sin").map(|arg| (i, arg)))?;
        let j = factors.iter()
            .position(|factor| factor.as_unary_call("cos") == Some(arg))?;

        let mut new_factors = factors.iter()
            .enumerate()
            .filter(|(idx, _)| *idx != i && *idx != j)
            .map(|(_, factor)| factor.clone())
            .collect::<Vec<_>>();
        new_factors.push(Expr::number(rational((1, 2))));
        new_factors.push(Expr::call("sin", vec![Expr::integer(2) * arg.clone()]));
        Some(Expr::Mul(new_factors))
    })
}

/// Applies the Pythagorean and double-angle identities.
pub fn identities(expr: &Expr) -> Option<Expr> {
    pythagorean(expr)
        .or_else(|| pythagorean_complement(expr))
        .or_else(|| double_angle(expr))
}

/// If the factor is `name(a)^n` for a nonzero integer `n` (including `name(a)` itself), returns
/// `a` and `n`.
fn integer_power_of<'a>(factor: &'a Expr, name: &str) -> Option<(&'a Expr, i32)> {
    match factor {
        Expr::Exp(base, exp) => {
            let n = exp.as_number().and_then(to_i32).filter(|n| *n != 0)?;
            base.as_unary_call(name).map(|arg| (arg, n))
        },
        _ => factor.as_unary_call(name).map(|arg| (arg, 1)),
    }
}

/// `sin(a)/cos(a) = tan(a)`
/// `cos(a)/sin(a) = cot(a)`
///
/// Higher powers are handled as well: `sin(a)^3/cos(a)^2 = sin(a)*tan(a)^2`.
pub fn quotient(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        for (i, factor) in factors.iter().enumerate() {
            let Some((arg, sin_exp)) = integer_power_of(factor, "sin") else {
                continue;
            };
            let Some((j, cos_exp)) = factors.iter()
                .enumerate()
                .find_map(|(j, other)| match integer_power_of(other, "cos") {
                    Some((cos_arg, n)) if cos_arg == arg => Some((j, n)),
                    _ => None,
                }) else {
                continue;
            };

            let (name, k) = if sin_exp > 0 && cos_exp < 0 {
                ("tan", sin_exp.min(-cos_exp))
            } else if sin_exp < 0 && cos_exp > 0 {
                ("cot", cos_exp.min(-sin_exp))
            } else {
                continue;
            };
            let (sin_left, cos_left) = if name == "tan" {
                (sin_exp - k, cos_exp + k)
            } else {
                (sin_exp + k, cos_exp - k)
            };

            let mut new_factors = factors.iter()
                .enumerate()
                .filter(|(idx, _)| *idx != i && *idx != j)
                .map(|(_, factor)| factor.clone())
                .collect::<Vec<_>>();
            new_factors.push(Expr::pow(Expr::call("sin", vec![arg.clone()]), Expr::integer(sin_left.into())));
            new_factors.push(Expr::pow(Expr::call("cos", vec![arg.clone()]), Expr::integer(cos_left.into())));
            new_factors.push(Expr::pow(Expr::call(name, vec![arg.clone()]), Expr::integer(k.into())));
            return Some(Expr::Mul(new_factors));
        }

        None
    })
}

/// `1/cos(a)^n = sec(a)^n`
/// `1/sin(a)^n = csc(a)^n`
pub fn reciprocal(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        let exp = rhs.as_number().filter(|n| is_negative(n) && is_integer(n))?;
        let (name, arg) = lhs.as_unary_call("cos")
            .map(|arg| ("sec", arg))
            .or_else(|| lhs.as_unary_call("sin").map(|arg| ("csc", arg)))?;
        Some(Expr::pow(
            Expr::call(name, vec![arg.clone()]),
            Expr::number(Rational::from(-exp)),
        ))
    })
}

/// Rebuilds `tan`, `cot`, `sec` and `csc` from `sin` and `cos`.
pub fn recombine(expr: &Expr) -> Option<Expr> {
    quotient(expr)
        .or_else(|| reciprocal(expr))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn rewrite_in_sin_cos() {
        let expr = parse("tan(x) + sec(2x)").unwrap();
        assert_eq!(to_sin_cos(&expr), Expr::Add(vec![
            parse("sin(x) cos(x)^(-1)").unwrap(),
            parse("cos(2x)^(-1)").unwrap(),
        ]));
    }

    #[test]
    fn pythagorean_identity() {
        let expr = parse("3 sin(x)^2 + y + 3 cos(x)^2").unwrap();
        let result = pythagorean(&expr).unwrap();
        assert_eq!(result, Expr::Add(vec![Expr::symbol("y"), Expr::integer(3)]));
    }

    #[test]
    fn cosine_double_angle() {
        let expr = parse("cos(x)^2 - sin(x)^2").unwrap();
        let result = pythagorean(&expr).unwrap();
        assert_eq!(result, parse("cos(2x)").unwrap());
    }

    #[test]
    fn complement() {
        let expr = parse("1 - sin(x)^2").unwrap();
        let result = pythagorean_complement(&expr).unwrap();
        assert_eq!(result, parse("cos(x)^2").unwrap());
    }

    #[test]
    fn reciprocal_power() {
        let expr = parse("cos(x)^(-2)").unwrap();
        assert_eq!(reciprocal(&expr), Some(parse("sec(x)^2").unwrap()));
    }
}
