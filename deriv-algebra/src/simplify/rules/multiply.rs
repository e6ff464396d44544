//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::{
    primitive::is_one,
    simplify::rules::do_multiply,
};
use super::{Expr, Primary};

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                _ => new_factors.push(factor.clone()),
            }
        }
        Some(Expr::Mul(new_factors))
    })
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        factors.iter()
            .any(Expr::is_zero)
            .then(Expr::zero)
    })
}

/// Multiplies all numeric factors together, dropping the result if it is one.
///
/// `1*a = a`
/// `2*a*3 = 6*a`
pub fn fold_numbers(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let numbers = factors.iter().filter(|factor| factor.is_number()).count();
        let has_one = factors.iter().any(Expr::is_one);
        if numbers < 2 && !has_one {
            return None;
        }

        let (coeff, rest) = expr.as_coeff_factors();
        let mut new_factors = Vec::with_capacity(rest.len() + 1);
        if !is_one(&coeff) {
            new_factors.push(Expr::number(coeff));
        }
        new_factors.extend(rest);
        Some(Expr::Mul(new_factors).downgrade())
    })
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^2*a^3 = a^5`
/// `a*a^-1 = a^0`
///
/// Powers of numbers, such as `2^(1/2)`, are left alone.
pub fn combine_like_factors(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let mut new_factors = Vec::with_capacity(factors.len());
        let mut combined = vec![false; factors.len()];
        let mut changed = false;

        for (i, factor) in factors.iter().enumerate() {
            if combined[i] {
                continue;
            }

            let (base, exp) = factor.as_base_exp();
            if base.is_number() {
                new_factors.push(factor.clone());
                continue;
            }

            let mut exponents = vec![exp];
            for (j, other) in factors.iter().enumerate().skip(i + 1) {
                if combined[j] {
                    continue;
                }

                let (other_base, other_exp) = other.as_base_exp();
                if other_base == base {
                    exponents.push(other_exp);
                    combined[j] = true;
                }
            }

            if exponents.len() > 1 {
                changed = true;
                new_factors.push(Expr::pow(base, Expr::Add(exponents)));
            } else {
                new_factors.push(factor.clone());
            }
        }

        changed.then(|| Expr::Mul(new_factors).downgrade())
    })
}

/// `2*(a+b) = 2a+2b`
///
/// Only a lone numeric coefficient is distributed, so products such as `x*(x+1)` keep their
/// shape.
pub fn distribute_coefficient(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let [a, b] = factors else {
            return None;
        };
        let (coeff, terms) = match (a, b) {
            (Expr::Primary(Primary::Number(n)), Expr::Add(terms))
                | (Expr::Add(terms), Expr::Primary(Primary::Number(n))) => (n, terms),
            _ => return None,
        };

        Some(Expr::Add(
            terms.iter()
                .map(|term| Expr::number(coeff.clone()) * term.clone())
                .collect(),
        ))
    })
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    flatten(expr)
        .or_else(|| multiply_zero(expr))
        .or_else(|| fold_numbers(expr))
        .or_else(|| combine_like_factors(expr))
        .or_else(|| distribute_coefficient(expr))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fold() {
        let expr = parse("2*x*3").unwrap();
        assert_eq!(fold_numbers(&expr).unwrap(), parse("6x").unwrap());
        assert_eq!(fold_numbers(&parse("1*x").unwrap()).unwrap(), Expr::symbol("x"));
    }

    #[test]
    fn like_factors() {
        let expr = parse("x * y * x^2").unwrap();
        let result = combine_like_factors(&expr).unwrap();
        assert_eq!(result, Expr::Mul(vec![
            Expr::pow(Expr::symbol("x"), Expr::Add(vec![Expr::one(), Expr::integer(2)])),
            Expr::symbol("y"),
        ]));
    }

    #[test]
    fn distribute_lone_coefficient() {
        let expr = Expr::Mul(vec![Expr::integer(2), parse("x + 1").unwrap()]);
        let result = distribute_coefficient(&expr).unwrap();
        assert_eq!(result, Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(2), Expr::symbol("x")]),
            Expr::integer(2),
        ]));
    }
}
