//! The derivation tree: a record of *how* an expression is differentiated.
//!
//! A [`Derivation`] is built once by [`build`](crate::build::build), then consumed by the
//! [evaluator](crate::eval) and the [renderer](crate::render). Neither of them modifies the tree,
//! so a tree can be evaluated and rendered any number of times with the same result.

use deriv_algebra::Expr;

/// One node of a derivation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    /// The expression being differentiated at this node.
    pub context: Expr,

    /// The variable of differentiation.
    pub symbol: String,

    /// The differentiation rule applied to [`Derivation::context`].
    pub rule: Rule,
}

/// A differentiation rule, along with the data needed to evaluate and explain it.
///
/// Every substep is a derivation of an expression strictly smaller than the node's context.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The expression does not depend on the variable.
    Constant,

    /// `d/dx (c * f) = c * d/dx f`, where `c` does not depend on the variable.
    ConstantTimes {
        constant: Expr,
        other: Expr,
        substep: Box<Derivation>,
    },

    /// `d/dx x^n = n x^(n - 1)`. The base is the variable itself.
    Power {
        base: Expr,
        exponent: Expr,
    },

    /// `d/dx a^x = a^x ln(a)`. The exponent is the variable itself.
    Exponential {
        base: Expr,
        exponent: Expr,
    },

    /// `d/dx log_b(x) = 1 / (x ln(b))`. A base of [`None`] is the natural logarithm.
    Logarithm {
        argument: Expr,
        base: Option<Expr>,
    },

    /// Term-by-term differentiation of a sum.
    Sum {
        substeps: Vec<Derivation>,
    },

    /// The product rule over any number of factors.
    Product {
        terms: Vec<Expr>,
        substeps: Vec<Derivation>,
    },

    /// The quotient rule, `(g f' - f g') / g^2`.
    Quotient {
        numerator: Expr,
        denominator: Expr,
        numerator_step: Box<Derivation>,
        denominator_step: Box<Derivation>,
    },

    /// The chain rule. The outer derivation differentiates with respect to the fresh `variable`,
    /// which stands in for `inner`.
    Chain {
        outer: Box<Derivation>,
        inner: Expr,
        variable: String,
        inner_step: Box<Derivation>,
    },

    /// The derivative of `sin`, `cos`, `tan`, `csc`, `sec` or `cot` of the variable.
    Trig {
        function: Expr,
    },

    /// The expression is rewritten into an equivalent form, which is then differentiated.
    Rewrite {
        rewritten: Expr,
        substep: Box<Derivation>,
    },

    /// Several ways of finding the same derivative. The first candidate is the canonical one.
    Alternative {
        candidates: Vec<Derivation>,
    },

    /// An application of an undefined function, such as `f(x)`.
    Function,

    /// No rule applies. The derivative is computed without explanation.
    Unknown,
}

impl Derivation {
    /// Creates a new derivation node.
    pub fn new(context: Expr, symbol: impl Into<String>, rule: Rule) -> Self {
        Self { context, symbol: symbol.into(), rule }
    }

    /// Returns a copy of the tree in which the symbol `from` is renamed to `to`, both inside
    /// expressions and as a variable of differentiation.
    pub fn replace_symbol(&self, from: &str, to: &str) -> Derivation {
        let expr = |e: &Expr| e.replace_symbol(from, to);
        let tree = |d: &Derivation| d.replace_symbol(from, to);
        let boxed = |d: &Derivation| Box::new(d.replace_symbol(from, to));

        let rule = match &self.rule {
            Rule::Constant => Rule::Constant,
            Rule::ConstantTimes { constant, other, substep } => Rule::ConstantTimes {
                constant: expr(constant),
                other: expr(other),
                substep: boxed(&**substep),
            },
            Rule::Power { base, exponent } => Rule::Power {
                base: expr(base),
                exponent: expr(exponent),
            },
            Rule::Exponential { base, exponent } => Rule::Exponential {
                base: expr(base),
                exponent: expr(exponent),
            },
            Rule::Logarithm { argument, base } => Rule::Logarithm {
                argument: expr(argument),
                base: base.as_ref().map(expr),
            },
            Rule::Sum { substeps } => Rule::Sum {
                substeps: substeps.iter().map(tree).collect(),
            },
            Rule::Product { terms, substeps } => Rule::Product {
                terms: terms.iter().map(expr).collect(),
                substeps: substeps.iter().map(tree).collect(),
            },
            Rule::Quotient { numerator, denominator, numerator_step, denominator_step } => Rule::Quotient {
                numerator: expr(numerator),
                denominator: expr(denominator),
                numerator_step: boxed(&**numerator_step),
                denominator_step: boxed(&**denominator_step),
            },
            Rule::Chain { outer, inner, variable, inner_step } => Rule::Chain {
                outer: boxed(&**outer),
                inner: expr(inner),
                variable: rename(variable, from, to),
                inner_step: boxed(&**inner_step),
            },
            Rule::Trig { function } => Rule::Trig { function: expr(function) },
            Rule::Rewrite { rewritten, substep } => Rule::Rewrite {
                rewritten: expr(rewritten),
                substep: boxed(&**substep),
            },
            Rule::Alternative { candidates } => Rule::Alternative {
                candidates: candidates.iter().map(tree).collect(),
            },
            Rule::Function => Rule::Function,
            Rule::Unknown => Rule::Unknown,
        };

        Derivation {
            context: expr(&self.context),
            symbol: rename(&self.symbol, from, to),
            rule,
        }
    }

    /// Returns the number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().map(Derivation::size).sum::<usize>()
    }

    /// Returns an iterator over the direct substeps of this node, in render order.
    pub fn children(&self) -> impl Iterator<Item = &Derivation> {
        let children: Vec<&Derivation> = match &self.rule {
            Rule::ConstantTimes { substep, .. } | Rule::Rewrite { substep, .. } => vec![&**substep],
            Rule::Sum { substeps } | Rule::Product { substeps, .. } => substeps.iter().collect(),
            Rule::Quotient { numerator_step, denominator_step, .. } => vec![&**numerator_step, &**denominator_step],
            Rule::Chain { outer, inner_step, .. } => vec![&**outer, &**inner_step],
            Rule::Alternative { candidates } => candidates.iter().collect(),
            Rule::Constant
            | Rule::Power { .. }
            | Rule::Exponential { .. }
            | Rule::Logarithm { .. }
            | Rule::Trig { .. }
            | Rule::Function
            | Rule::Unknown => Vec::new(),
        };
        children.into_iter()
    }
}

fn rename(name: &str, from: &str, to: &str) -> String {
    if name == from {
        to.to_owned()
    } else {
        name.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn replace_symbol_renames_everywhere() {
        let outer = Derivation::new(
            parse("sin(v)").unwrap(),
            "v",
            Rule::Trig { function: parse("sin(v)").unwrap() },
        );
        let inner = Derivation::new(
            parse("x^2").unwrap(),
            "x",
            Rule::Power { base: Expr::symbol("x"), exponent: Expr::integer(2) },
        );
        let chain = Derivation::new(
            parse("sin(x^2)").unwrap(),
            "x",
            Rule::Chain {
                outer: Box::new(outer),
                inner: parse("x^2").unwrap(),
                variable: "v".to_owned(),
                inner_step: Box::new(inner.clone()),
            },
        );

        let renamed = chain.replace_symbol("v", "u");
        let Rule::Chain { outer, variable, inner_step, .. } = &renamed.rule else {
            panic!("expected a chain rule");
        };
        assert_eq!(variable, "u");
        assert_eq!(outer.symbol, "u");
        assert_eq!(outer.context, parse("sin(u)").unwrap());
        assert_eq!(**inner_step, inner);

        // `chain` has no `u`, so renaming it is a no-op
        assert_eq!(chain.replace_symbol("u", "v"), chain);
    }

    #[test]
    fn size_counts_every_node() {
        let leaf = Derivation::new(Expr::symbol("x"), "x", Rule::Power {
            base: Expr::symbol("x"),
            exponent: Expr::one(),
        });
        let sum = Derivation::new(parse("x + x").unwrap(), "x", Rule::Sum {
            substeps: vec![leaf.clone(), leaf],
        });
        assert_eq!(sum.size(), 3);
    }
}
