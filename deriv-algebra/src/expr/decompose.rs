//! Ways of taking an expression apart: coefficients, bases and exponents, numerators and
//! denominators, and the parts that do or do not depend on a symbol.

use crate::primitive::{is_integer, is_negative, is_one, pow_int, rational, to_i32};
use rug::Rational;
use super::{Expr, Primary};

/// A product split into a numeric coefficient, the factors of its numerator, and the factors of
/// its denominator (with their exponents made positive).
///
/// Only factors with a negative *numeric* exponent are placed in the denominator. This is the
/// decomposition used for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FractionParts {
    /// The product of all numeric factors, including numbers raised to integer powers.
    pub coeff: Rational,

    /// The remaining factors with a non-negative exponent.
    pub numer: Vec<Expr>,

    /// The remaining factors with a negative exponent, inverted.
    pub denom: Vec<Expr>,
}

/// Returns the factors of the expression: the factors of an [`Expr::Mul`], or the expression
/// itself.
fn factors_of(expr: &Expr) -> &[Expr] {
    match expr {
        Expr::Mul(factors) => factors,
        _ => std::slice::from_ref(expr),
    }
}

/// Returns the factors of the expression, spreading integer powers of products over their
/// factors: `(4y^2)^-1` contributes `4^-1` and `y^-2`.
fn spread_factors(expr: &Expr) -> Vec<Expr> {
    let mut out = Vec::new();
    for factor in factors_of(expr) {
        match factor {
            Expr::Exp(base, exp) if matches!(**base, Expr::Mul(_)) && exp.as_number().is_some_and(is_integer) => {
                out.extend(factors_of(base).iter().map(|inner| scale_power(inner, exp)));
            },
            _ => out.push(factor.clone()),
        }
    }
    out
}

/// Raises the factor to the given power, multiplying numeric exponents together.
fn scale_power(factor: &Expr, exp: &Expr) -> Expr {
    if let Expr::Exp(base, inner) = factor {
        if let (Some(inner), Some(outer)) = (inner.as_number(), exp.as_number()) {
            return Expr::pow((**base).clone(), Expr::number(Rational::from(inner * outer)));
        }
    }
    Expr::pow(factor.clone(), exp.clone())
}

/// Builds `base^exp`, omitting an exponent of one.
fn power_or_base(base: &Expr, exp: Expr) -> Expr {
    if exp.is_one() {
        base.clone()
    } else {
        Expr::pow(base.clone(), exp)
    }
}

impl Expr {
    /// Splits the expression into its numeric coefficient, numerator and denominator.
    pub fn fraction_parts(&self) -> FractionParts {
        let mut parts = FractionParts {
            coeff: rational(1),
            numer: Vec::new(),
            denom: Vec::new(),
        };

        for factor in spread_factors(self) {
            match &factor {
                Expr::Primary(Primary::Number(n)) => parts.coeff *= n,
                Expr::Exp(base, exp) => {
                    let value = base.as_number()
                        .zip(exp.as_number().and_then(to_i32))
                        .and_then(|(base, exp)| pow_int(base, exp));
                    if let Some(value) = value {
                        parts.coeff *= value;
                        continue;
                    }

                    match exp.as_number().filter(|n| is_negative(n)) {
                        Some(n) => parts.denom.push(power_or_base(base, Expr::number(-n.clone()))),
                        None => parts.numer.push(factor.clone()),
                    }
                },
                _ => parts.numer.push(factor.clone()),
            }
        }

        parts
    }

    /// If the expression is a term with a negative numeric coefficient, returns the term with the
    /// coefficient negated.
    ///
    /// - `-3` -> `3`
    /// - `-2*x` -> `2*x`
    /// - `-1*sin(x)` -> `sin(x)`
    /// - `x` -> [`None`]
    pub fn neg_term(&self) -> Option<Expr> {
        match self {
            Expr::Primary(Primary::Number(n)) if is_negative(n) => Some(Expr::number(-n.clone())),
            Expr::Mul(_) => {
                let (coeff, mut rest) = self.as_coeff_factors();
                if !is_negative(&coeff) {
                    return None;
                }

                let coeff = -coeff;
                if !is_one(&coeff) || rest.is_empty() {
                    rest.insert(0, Expr::number(coeff));
                }
                Some(Expr::Mul(rest).downgrade())
            },
            _ => None,
        }
    }

    /// Splits the expression into the product of its numeric factors, and the remaining factors.
    ///
    /// - `5` -> `(5, [])`
    /// - `3*a*b` -> `(3, [a, b])`
    /// - `a` -> `(1, [a])`
    pub fn as_coeff_factors(&self) -> (Rational, Vec<Expr>) {
        let mut coeff = rational(1);
        let mut rest = Vec::new();
        for factor in factors_of(self) {
            match factor {
                Expr::Primary(Primary::Number(n)) => coeff *= n,
                _ => rest.push(factor.clone()),
            }
        }
        (coeff, rest)
    }

    /// Returns the base and exponent of the expression. Anything that is not a power has an
    /// exponent of one.
    pub fn as_base_exp(&self) -> (Expr, Expr) {
        match self {
            Expr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
            _ => (self.clone(), Expr::one()),
        }
    }

    /// Splits the expression into the product of the factors that do not depend on the symbol,
    /// and the product of the factors that do. Either side is one when empty.
    ///
    /// - `3*x^2` -> `(3, x^2)`
    /// - `a*sin(x)*b` -> `(a*b, sin(x))`
    /// - `x` -> `(1, x)`
    /// - `5` -> `(5, 1)`
    pub fn as_independent(&self, symbol: &str) -> (Expr, Expr) {
        let (independent, dependent): (Vec<_>, Vec<_>) = factors_of(self)
            .iter()
            .cloned()
            .partition(|factor| !factor.contains_symbol(symbol));
        (Expr::Mul(independent).downgrade(), Expr::Mul(dependent).downgrade())
    }

    /// Splits the expression into a numerator and a denominator. Factors whose exponent is a
    /// negative number, or has a negative coefficient (such as `e^(-x)`), belong to the
    /// denominator.
    ///
    /// - `1/x` -> `(1, x)`
    /// - `sin(x)/cos(x)` -> `(sin(x), cos(x))`
    /// - `3x/4` -> `(3x, 4)`
    /// - `x*e^(-x)` -> `(x, e^x)`
    pub fn as_numer_denom(&self) -> (Expr, Expr) {
        let mut numer = Vec::new();
        let mut denom = Vec::new();

        for factor in spread_factors(self) {
            match &factor {
                Expr::Primary(Primary::Number(n)) => {
                    if *n.numer() != 1 {
                        numer.push(Expr::number(Rational::from(n.numer().clone())));
                    }
                    if *n.denom() != 1 {
                        denom.push(Expr::number(Rational::from(n.denom().clone())));
                    }
                },
                Expr::Exp(base, exp) => match exp.neg_term() {
                    Some(positive) => denom.push(power_or_base(base, positive)),
                    None => numer.push(factor.clone()),
                },
                _ => numer.push(factor.clone()),
            }
        }

        (Expr::Mul(numer).downgrade(), Expr::Mul(denom).downgrade())
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn independent_parts() {
        let expr = parse("a*sin(x)*b").unwrap();
        let (independent, dependent) = expr.as_independent("x");
        assert_eq!(independent, Expr::Mul(vec![Expr::symbol("a"), Expr::symbol("b")]));
        assert_eq!(dependent, Expr::call("sin", vec![Expr::symbol("x")]));

        let (independent, dependent) = parse("x^2").unwrap().as_independent("x");
        assert_eq!(independent, Expr::one());
        assert_eq!(dependent, parse("x^2").unwrap());
    }

    #[test]
    fn numerator_and_denominator() {
        let (numer, denom) = parse("sin(x)/cos(x)").unwrap().as_numer_denom();
        assert_eq!(numer, parse("sin(x)").unwrap());
        assert_eq!(denom, parse("cos(x)").unwrap());

        let (numer, denom) = parse("1/x").unwrap().as_numer_denom();
        assert_eq!(numer, Expr::one());
        assert_eq!(denom, Expr::symbol("x"));

        let (numer, denom) = parse("x e^(-x)").unwrap().as_numer_denom();
        assert_eq!(numer, Expr::symbol("x"));
        assert_eq!(denom, parse("e^x").unwrap());
    }

    #[test]
    fn negated_terms() {
        assert_eq!(parse("-2x").unwrap().neg_term(), Some(parse("2x").unwrap()));
        assert_eq!(parse("-sin(x)").unwrap().neg_term(), Some(parse("sin(x)").unwrap()));
        assert_eq!(Expr::integer(-3).neg_term(), Some(Expr::integer(3)));
        assert_eq!(parse("2x").unwrap().neg_term(), None);
    }

    #[test]
    fn fraction_parts_fold_numeric_powers() {
        let parts = parse("3x/(4y^2)").unwrap().fraction_parts();
        assert_eq!(parts.coeff, rational((3, 4)));
        assert_eq!(parts.numer, vec![Expr::symbol("x")]);
        assert_eq!(parts.denom, vec![parse("y^2").unwrap()]);
    }
}
