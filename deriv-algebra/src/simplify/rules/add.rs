//! Simplification rules for expressions involving addition, including combining like terms.

use crate::{
    primitive::{is_one, is_zero},
    simplify::rules::do_add,
};
use rug::Rational;
use super::Expr;

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                _ => new_terms.push(term.clone()),
            }
        }
        Some(Expr::Add(new_terms))
    })
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Expr::Add(new_terms).downgrade())
        }
    })
}

/// Multiplies the rest of a term by its coefficient again.
pub(crate) fn with_coeff(coeff: Rational, factors: Vec<Expr>) -> Expr {
    if factors.is_empty() {
        return Expr::number(coeff);
    }
    if is_one(&coeff) {
        return Expr::Mul(factors).downgrade();
    }

    let mut new_factors = Vec::with_capacity(factors.len() + 1);
    new_factors.push(Expr::number(coeff));
    new_factors.extend(factors);
    Expr::Mul(new_factors)
}

/// Combines like terms, and adds numbers together.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `2+3 = 5`
/// `a-a = 0`
pub fn combine_like_terms(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        let mut new_terms = Vec::with_capacity(terms.len());
        let mut combined = vec![false; terms.len()];
        let mut changed = false;

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        for (i, term) in terms.iter().enumerate() {
            if combined[i] {
                continue;
            }

            let (mut coeff, factors) = term.as_coeff_factors();
            let rest = Expr::Mul(factors.clone());
            let mut merged = false;
            for (j, other) in terms.iter().enumerate().skip(i + 1) {
                if combined[j] {
                    continue;
                }

                // factors must be strictly equal
                let (other_coeff, other_factors) = other.as_coeff_factors();
                if Expr::Mul(other_factors) == rest {
                    coeff += other_coeff;
                    combined[j] = true;
                    merged = true;
                }
            }

            if merged {
                changed = true;
                if !is_zero(&coeff) {
                    new_terms.push(with_coeff(coeff, factors));
                }
            } else {
                new_terms.push(term.clone());
            }
        }

        changed.then(|| Expr::Add(new_terms).downgrade())
    })
}

/// Applies all addition rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    flatten(expr)
        .or_else(|| add_zero(expr))
        .or_else(|| combine_like_terms(expr))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn combine_terms() {
        let expr = parse("2x + 3 + 3x - 3").unwrap();
        let result = combine_like_terms(&expr).unwrap();
        assert_eq!(result, parse("5x").unwrap());
    }

    #[test]
    fn cancel_terms() {
        let expr = parse("sin(x) - sin(x)").unwrap();
        let result = combine_like_terms(&expr).unwrap();
        assert_eq!(result, Expr::zero());
    }

    #[test]
    fn nothing_to_combine() {
        let expr = parse("x + y").unwrap();
        assert_eq!(combine_like_terms(&expr), None);
    }
}
