//! Simplification rules related to the distributive property. Only used by
//! [`expand`](crate::simplify::expand).

use crate::{
    primitive::to_i32,
    simplify::rules::{do_multiply, do_power},
};
use super::Expr;

/// Largest power of a sum that [`expand_power`] will multiply out.
const MAX_EXPANDED_POWER: i32 = 8;

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        // find the first `Expr::Add`, and distribute every other factor over it
        let mut factors_to_distribute = factors.to_vec();
        let idx = factors_to_distribute.iter()
            .position(|factor| matches!(factor, Expr::Add(_)))?;
        let Expr::Add(terms) = factors_to_distribute.swap_remove(idx) else {
            return None;
        };

        let new_terms = terms.into_iter()
            .map(|term| Expr::Mul(factors_to_distribute.clone()) * term)
            .collect::<Vec<_>>();
        Some(Expr::Add(new_terms))
    })
}

/// `(a+b)^2 = (a+b)*(a+b)`
pub fn expand_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        if !matches!(lhs, Expr::Add(_)) {
            return None;
        }

        let n = rhs.as_number().and_then(to_i32)?;
        (2..=MAX_EXPANDED_POWER).contains(&n)
            .then(|| Expr::Mul(vec![lhs.clone(); n as usize]))
    })
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations.
pub fn all(expr: &Expr) -> Option<Expr> {
    distributive_property(expr)
        .or_else(|| expand_power(expr))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn distribute_over_sum() {
        let expr = parse("x*(y+2)").unwrap();
        let result = distributive_property(&expr).unwrap();
        assert_eq!(result, Expr::Add(vec![
            Expr::Mul(vec![Expr::symbol("x"), Expr::symbol("y")]),
            Expr::Mul(vec![Expr::symbol("x"), Expr::integer(2)]),
        ]));
    }

    #[test]
    fn square_of_sum() {
        let expr = parse("(x+1)^2").unwrap();
        let result = expand_power(&expr).unwrap();
        assert_eq!(result, Expr::Mul(vec![parse("x+1").unwrap(), parse("x+1").unwrap()]));
        assert_eq!(expand_power(&parse("(x+1)^(-2)").unwrap()), None);
    }
}
