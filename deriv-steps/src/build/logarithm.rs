use deriv_algebra::Expr;
use crate::tree::{Derivation, Rule};
use super::Builder;

impl Builder<'_> {
    /// Builds the derivation of `log(u)` or `log(u, b)`.
    ///
    /// A base free of the variable is treated like the natural logarithm. A base that depends on
    /// the variable is left unexplained.
    pub(super) fn logarithm(&mut self, expr: &Expr, args: &[Expr]) -> Derivation {
        let (argument, base) = match args {
            [argument] => (argument, None),
            [argument, base] => (argument, Some(base.clone())),
            _ => return self.node(expr, Rule::Unknown),
        };

        if base.as_ref().is_some_and(|base| base.contains_symbol(self.symbol)) {
            return self.node(expr, Rule::Unknown);
        }

        if argument.as_symbol() == Some(self.symbol) {
            return self.node(expr, Rule::Logarithm { argument: argument.clone(), base });
        }

        self.chain(expr, argument, |u| {
            let args = std::iter::once(u.clone()).chain(base.clone()).collect();
            (Expr::call("log", args), Rule::Logarithm { argument: u, base })
        })
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use crate::build::build;
    use super::*;

    #[test]
    fn natural_log() {
        let tree = build(&parse("ln(x)").unwrap(), "x");
        assert_eq!(tree.rule, Rule::Logarithm { argument: Expr::symbol("x"), base: None });
    }

    #[test]
    fn constant_base() {
        let tree = build(&parse("log(x, 10)").unwrap(), "x");
        assert_eq!(tree.rule, Rule::Logarithm {
            argument: Expr::symbol("x"),
            base: Some(Expr::integer(10)),
        });

        let tree = build(&parse("log(x^2 + 1, 2)").unwrap(), "x");
        let Rule::Chain { outer, .. } = &tree.rule else {
            panic!("expected a chain rule, got {:?}", tree.rule);
        };
        assert!(matches!(
            &outer.rule,
            Rule::Logarithm { base: Some(base), .. } if *base == Expr::integer(2)
        ));
    }

    #[test]
    fn variable_base_is_unknown() {
        let tree = build(&parse("log(3, x)").unwrap(), "x");
        assert_eq!(tree.rule, Rule::Unknown);
    }
}
