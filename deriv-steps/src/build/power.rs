use deriv_algebra::Expr;
use crate::tree::{Derivation, Rule};
use super::Builder;

impl Builder<'_> {
    /// Builds the derivation of `base^exponent`, or of the variable itself.
    ///
    /// - `a^x`: exponential rule; `a^g(x)`: chain rule around it.
    /// - `x^n`: power rule; `f(x)^n`: chain rule around it.
    /// - `f(x)^g(x)`: unknown, since logarithmic differentiation is not explained.
    pub(super) fn power(&mut self, expr: &Expr) -> Derivation {
        let (base, exponent) = expr.as_base_exp();

        if !base.contains_symbol(self.symbol) {
            if exponent.as_symbol() == Some(self.symbol) {
                self.node(expr, Rule::Exponential { base, exponent })
            } else {
                self.chain(expr, &exponent, |u| (
                    Expr::pow(base.clone(), u.clone()),
                    Rule::Exponential { base, exponent: u },
                ))
            }
        } else if !exponent.contains_symbol(self.symbol) {
            if base.as_symbol() == Some(self.symbol) {
                self.node(expr, Rule::Power { base, exponent })
            } else {
                self.chain(expr, &base, |u| (
                    Expr::pow(u.clone(), exponent.clone()),
                    Rule::Power { base: u, exponent },
                ))
            }
        } else {
            self.node(expr, Rule::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use crate::build::build;
    use super::*;

    #[test]
    fn direct_power() {
        let tree = build(&parse("x^3").unwrap(), "x");
        assert_eq!(tree.rule, Rule::Power {
            base: Expr::symbol("x"),
            exponent: Expr::integer(3),
        });
    }

    #[test]
    fn variable_is_first_power() {
        let tree = build(&Expr::symbol("t"), "t");
        assert_eq!(tree.rule, Rule::Power {
            base: Expr::symbol("t"),
            exponent: Expr::one(),
        });
    }

    #[test]
    fn power_of_compound_base() {
        let tree = build(&parse("(x^2 + 1)^5").unwrap(), "x");
        let Rule::Chain { outer, inner, variable, inner_step } = &tree.rule else {
            panic!("expected a chain rule, got {:?}", tree.rule);
        };
        assert_eq!(*inner, parse("x^2 + 1").unwrap());
        assert_eq!(outer.symbol, *variable);
        assert_eq!(outer.rule, Rule::Power {
            base: Expr::symbol(variable.clone()),
            exponent: Expr::integer(5),
        });
        assert!(matches!(inner_step.rule, Rule::Sum { .. }));
    }

    #[test]
    fn exponentials() {
        let tree = build(&parse("2^x").unwrap(), "x");
        assert_eq!(tree.rule, Rule::Exponential {
            base: Expr::integer(2),
            exponent: Expr::symbol("x"),
        });

        let tree = build(&parse("e^(x^2)").unwrap(), "x");
        let Rule::Chain { outer, inner, .. } = &tree.rule else {
            panic!("expected a chain rule, got {:?}", tree.rule);
        };
        assert_eq!(*inner, parse("x^2").unwrap());
        assert!(matches!(outer.rule, Rule::Exponential { .. }));
    }

    #[test]
    fn variable_base_and_exponent() {
        let tree = build(&parse("x^x").unwrap(), "x");
        assert_eq!(tree.rule, Rule::Unknown);
    }
}
