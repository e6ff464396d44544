//! The rule builders, which recursively turn an expression into a [`Derivation`].
//!
//! The recursion performed here *is* the differentiation algorithm: each builder decides which
//! identity applies to its expression, and builds the substeps for the smaller expressions the
//! identity needs. Building never fails; shapes that no builder understands become
//! [`Rule::Unknown`] leaves, which are differentiated natively.

mod logarithm;
mod power;
mod product;
mod trig;

use deriv_algebra::{Expr, FreshSymbols};
use crate::{select::{as_trig_call, select, RuleKind}, tree::{Derivation, Rule}};

/// Builds the derivation of `expr` with respect to `symbol`.
pub fn build(expr: &Expr, symbol: &str) -> Derivation {
    Builder::new(symbol).build(expr)
}

/// Builds the nodes of a single derivation tree.
struct Builder<'a> {
    /// The variable of differentiation.
    symbol: &'a str,

    /// Source of the substitution variables used by the chain rule.
    fresh: FreshSymbols,
}

impl<'a> Builder<'a> {
    fn new(symbol: &'a str) -> Self {
        Self { symbol, fresh: FreshSymbols::new() }
    }

    /// Selects a rule for the expression and builds it.
    fn build(&mut self, expr: &Expr) -> Derivation {
        let kind = select(expr, self.symbol);
        tracing::debug!(target: "steps", expr = %expr, rule = ?kind, "selected rule");

        match kind {
            RuleKind::Trig => match as_trig_call(expr) {
                Some((name, argument)) => self.trig(expr, name, argument),
                None => self.node(expr, Rule::Unknown),
            },
            RuleKind::Function => self.node(expr, Rule::Function),
            RuleKind::Constant => self.node(expr, Rule::Constant),
            RuleKind::Power => self.power(expr),
            RuleKind::Sum => self.sum(expr),
            RuleKind::Product => self.product(expr),
            RuleKind::Logarithm => match expr.as_call() {
                Some((_, args)) => self.logarithm(expr, args),
                None => self.node(expr, Rule::Unknown),
            },
            RuleKind::Unknown => self.node(expr, Rule::Unknown),
        }
    }

    /// Creates a node differentiating `expr` with respect to the builder's variable.
    fn node(&self, expr: &Expr, rule: Rule) -> Derivation {
        Derivation::new(expr.clone(), self.symbol, rule)
    }

    /// Wraps a rule in the chain rule, substituting a fresh variable `u` for `inner`.
    ///
    /// `outer` receives `u` and returns the outer expression in terms of `u`, along with the
    /// rule that differentiates it with respect to `u`.
    fn chain(
        &mut self,
        expr: &Expr,
        inner: &Expr,
        outer: impl FnOnce(Expr) -> (Expr, Rule),
    ) -> Derivation {
        let variable = self.fresh.next_name();
        let (context, rule) = outer(Expr::symbol(variable.clone()));
        let outer = Derivation::new(context, variable.clone(), rule);
        let inner_step = self.build(inner);

        self.node(expr, Rule::Chain {
            outer: Box::new(outer),
            inner: inner.clone(),
            variable,
            inner_step: Box::new(inner_step),
        })
    }

    /// `(f + g)' = f' + g'`
    fn sum(&mut self, expr: &Expr) -> Derivation {
        let substeps = match expr {
            Expr::Add(terms) => terms.iter().map(|term| self.build(term)).collect(),
            _ => vec![self.build(expr)],
        };
        self.node(expr, Rule::Sum { substeps })
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Builds the derivation of the input with respect to `x`.
    pub(crate) fn build_x(input: &str) -> Derivation {
        build(&parse(input).unwrap(), "x")
    }

    #[test]
    fn sum_of_terms() {
        let tree = build_x("x^2 + 5");
        let Rule::Sum { substeps } = &tree.rule else {
            panic!("expected a sum, got {:?}", tree.rule);
        };
        assert_eq!(substeps.len(), 2);
        assert_eq!(substeps[0].rule, Rule::Power {
            base: Expr::symbol("x"),
            exponent: Expr::integer(2),
        });
        assert_eq!(substeps[1].rule, Rule::Constant);
    }

    #[test]
    fn undefined_function_is_opaque() {
        let tree = build_x("f(x)");
        assert_eq!(tree.rule, Rule::Function);
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn fresh_variables_are_distinct() {
        let tree = build_x("sin(x^2) + cos(x^3)");
        let variables = tree.children()
            .map(|child| match &child.rule {
                Rule::Chain { variable, .. } => variable.clone(),
                rule => panic!("expected a chain rule, got {:?}", rule),
            })
            .collect::<Vec<_>>();
        assert_eq!(variables.len(), 2);
        assert_ne!(variables[0], variables[1]);
    }
}
