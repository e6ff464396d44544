//! Factoring of sums: combining terms over a common denominator, and pulling out common factors.
//!
//! This is not polynomial factorization; `x^2 - 1` is left alone. Only factors that already
//! appear in every term of a sum are extracted.

use crate::{
    expr::Expr,
    primitive::{int, is_integer, is_negative, is_one, rational},
};
use rug::{Integer, Rational};
use super::simplify;

/// Splits a factor into a base and a numeric exponent. Factors whose exponent is not a number are
/// treated as a base raised to the power of one.
fn power_parts(factor: &Expr) -> (Expr, Rational) {
    match factor {
        Expr::Exp(base, exp) => match exp.as_number() {
            Some(n) => ((**base).clone(), n.clone()),
            None => (factor.clone(), rational(1)),
        },
        _ => (factor.clone(), rational(1)),
    }
}

/// Builds `base^exp`, omitting an exponent of one.
fn power(base: Expr, exp: Rational) -> Expr {
    if is_one(&exp) {
        base
    } else {
        Expr::pow(base, Expr::number(exp))
    }
}

/// Builds `coeff*factors` without simplifying.
fn product(coeff: Rational, factors: Vec<Expr>) -> Expr {
    let mut new_factors = Vec::with_capacity(factors.len() + 1);
    if !is_one(&coeff) || factors.is_empty() {
        new_factors.push(Expr::number(coeff));
    }
    new_factors.extend(factors);
    Expr::Mul(new_factors).downgrade()
}

/// A term of a sum, split into its numeric coefficient and the base / exponent pairs of its
/// remaining factors.
struct Term {
    coeff: Rational,
    factors: Vec<(Expr, Rational)>,
}

impl Term {
    fn new(expr: &Expr) -> Self {
        let (coeff, rest) = expr.as_coeff_factors();
        Self {
            coeff,
            factors: rest.iter().map(power_parts).collect(),
        }
    }

    /// Returns the exponent of the factor with the given base, if any.
    fn exponent_of(&self, base: &Expr) -> Option<&Rational> {
        self.factors.iter()
            .find(|(other, _)| other == base)
            .map(|(_, exp)| exp)
    }

    /// Divides the term by `coeff * base^exp` for each of the given factors.
    fn divide(self, coeff: &Rational, common: &[(Expr, Rational)]) -> Expr {
        let factors = self.factors.into_iter()
            .filter_map(|(base, exp)| {
                let exp = match common.iter().find(|(other, _)| *other == base) {
                    Some((_, common_exp)) => exp - common_exp.clone(),
                    None => exp,
                };
                (exp.cmp0() != std::cmp::Ordering::Equal).then(|| power(base, exp))
            })
            .collect();
        product(self.coeff / coeff, factors)
    }
}

/// Combines the terms of a sum over a common denominator. Returns the terms of the numerator, the
/// numeric part of the denominator, and the remaining factors of the denominator.
///
/// Returns [`None`] if the terms have no denominator.
fn together(terms: &[Expr]) -> Option<(Vec<Expr>, Integer, Vec<(Expr, Rational)>)> {
    let mut numeric = int(1);
    let mut denom: Vec<(Expr, Rational)> = Vec::new();

    for term in terms.iter().map(Term::new) {
        numeric = numeric.lcm(term.coeff.denom());
        for (base, exp) in term.factors {
            if !is_negative(&exp) {
                continue;
            }

            let exp = -exp;
            match denom.iter_mut().find(|(other, _)| *other == base) {
                Some((_, max)) => if exp > *max {
                    *max = exp;
                },
                None => denom.push((base, exp)),
            }
        }
    }

    if numeric == 1 && denom.is_empty() {
        return None;
    }

    let mut multiplier = vec![Expr::number(Rational::from(numeric.clone()))];
    multiplier.extend(denom.iter().map(|(base, exp)| power(base.clone(), exp.clone())));

    let numerator = simplify(&Expr::Add(
        terms.iter()
            .map(|term| term.clone() * Expr::Mul(multiplier.clone()))
            .collect(),
    ));
    let terms = match numerator {
        Expr::Add(terms) => terms,
        other => vec![other],
    };
    Some((terms, numeric, denom))
}

/// Finds the numeric content and the factors common to every term, with the smallest exponent
/// that appears.
fn common_factors(terms: &[Term]) -> (Rational, Vec<(Expr, Rational)>) {
    let Some((first, rest)) = terms.split_first() else {
        return (rational(1), Vec::new());
    };

    let mut coeff = rational(1);
    if terms.iter().all(|term| is_integer(&term.coeff)) {
        let gcd = terms.iter()
            .fold(Integer::new(), |gcd, term| gcd.gcd(term.coeff.numer()));
        if gcd != 0 {
            coeff = Rational::from(gcd);
        }
    }
    if terms.iter().all(|term| is_negative(&term.coeff)) {
        coeff = -coeff;
    }

    let common = first.factors.iter()
        .filter_map(|(base, exp)| {
            if is_negative(exp) {
                return None;
            }

            let mut min = exp.clone();
            for term in rest {
                let other = term.exponent_of(base).filter(|other| !is_negative(other))?;
                if *other < min {
                    min = other.clone();
                }
            }
            Some((base.clone(), min))
        })
        .collect();

    (coeff, common)
}

/// Factors a sum whose terms are already simplified.
fn factor_sum(terms: &[Expr]) -> Expr {
    let (numerator, numeric, denom) = match together(terms) {
        Some(combined) => combined,
        None => (terms.to_vec(), int(1), Vec::new()),
    };

    let split = numerator.iter().map(Term::new).collect::<Vec<_>>();
    let (coeff, common) = if split.len() > 1 {
        common_factors(&split)
    } else {
        (rational(1), Vec::new())
    };

    let inner = if split.len() > 1 {
        Expr::Add(
            split.into_iter()
                .map(|term| factor_node(term.divide(&coeff, &common)))
                .collect(),
        )
    } else {
        numerator.into_iter()
            .map(factor_node)
            .next()
            .unwrap_or_else(Expr::zero)
    };

    let mut factors = common.into_iter()
        .map(|(base, exp)| power(factor_node(base), exp))
        .collect::<Vec<_>>();
    factors.push(inner);
    factors.extend(denom.into_iter().map(|(base, exp)| power(factor_node(base), -exp)));

    product(coeff / Rational::from(numeric), factors)
}

fn factor_node(expr: Expr) -> Expr {
    match expr {
        Expr::Add(terms) => factor_sum(&terms),
        Expr::Mul(factors) => Expr::Mul(factors.into_iter().map(factor_node).collect()),
        Expr::Exp(base, exp) => Expr::pow(factor_node(*base), factor_node(*exp)),
        Expr::Primary(crate::expr::Primary::Call(name, args)) => {
            Expr::call(name, args.into_iter().map(factor_node).collect())
        },
        Expr::Primary(_) => expr,
    }
}

/// Factors the given expression.
///
/// The expression is simplified first. Every sum in the result is then combined over a common
/// denominator, and its greatest common numeric content, sign, and common factors are pulled out.
/// The result is not simplified again, since simplification would distribute a lone numeric
/// coefficient back over the sum.
///
/// `3x^2 + 6x = 3x(x + 2)`
/// `x/2 + 1/3 = (3x + 2)/6`
/// `-2x - 4 = -2(x + 2)`
pub fn factor(expr: &Expr) -> Expr {
    factor_node(simplify(expr))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn common_power() {
        let result = factor(&parse("3x^2 + 6x").unwrap());
        assert_eq!(result, Expr::Mul(vec![
            Expr::integer(3),
            Expr::symbol("x"),
            Expr::Add(vec![Expr::symbol("x"), Expr::integer(2)]),
        ]));
    }

    #[test]
    fn common_denominator() {
        let result = factor(&parse("x/2 + 1/3").unwrap());
        assert_eq!(result, Expr::Mul(vec![
            Expr::number(rational((1, 6))),
            parse("3x + 2").unwrap(),
        ]));
    }

    #[test]
    fn negative_terms() {
        let result = factor(&parse("-2x - 4").unwrap());
        assert_eq!(result, Expr::Mul(vec![
            Expr::integer(-2),
            parse("x + 2").unwrap(),
        ]));
    }

    #[test]
    fn nothing_in_common() {
        let expr = parse("x^2 + y").unwrap();
        assert_eq!(factor(&expr), expr);
    }

    #[test]
    fn symbolic_denominator() {
        let result = factor(&parse("1/x + 1").unwrap());
        assert_eq!(result, Expr::Mul(vec![
            parse("1 + x").unwrap(),
            Expr::recip(Expr::symbol("x")),
        ]));
    }
}
