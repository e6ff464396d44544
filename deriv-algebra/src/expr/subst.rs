use super::{Expr, Primary};

impl Expr {
    /// Replaces every subtree strictly equal to `from` with `to`. Sums and products are flattened
    /// again where a substituted sum or product lands inside another one.
    pub fn substitute(&self, from: &Expr, to: &Expr) -> Expr {
        if self == from {
            return to.clone();
        }

        match self {
            Expr::Primary(Primary::Call(name, args)) => Expr::call(
                name.clone(),
                args.iter().map(|arg| arg.substitute(from, to)).collect(),
            ),
            Expr::Primary(_) => self.clone(),
            Expr::Add(terms) => {
                let mut new_terms = Vec::with_capacity(terms.len());
                for term in terms {
                    match term.substitute(from, to) {
                        Expr::Add(inner) => new_terms.extend(inner),
                        term => new_terms.push(term),
                    }
                }
                Expr::Add(new_terms)
            },
            Expr::Mul(factors) => {
                let mut new_factors = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor.substitute(from, to) {
                        Expr::Mul(inner) => new_factors.extend(inner),
                        factor => new_factors.push(factor),
                    }
                }
                Expr::Mul(new_factors)
            },
            Expr::Exp(base, exp) => Expr::pow(base.substitute(from, to), exp.substitute(from, to)),
        }
    }

    /// Replaces every occurrence of the symbol `from` with the symbol `to`.
    pub fn replace_symbol(&self, from: &str, to: &str) -> Expr {
        self.substitute(&Expr::symbol(from), &Expr::symbol(to))
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn substitute_symbol_with_sum() {
        let expr = parse("u^2 + u").unwrap();
        let result = expr.substitute(&Expr::symbol("u"), &parse("x + 1").unwrap());
        assert_eq!(result, Expr::Add(vec![
            Expr::pow(parse("x + 1").unwrap(), Expr::integer(2)),
            Expr::symbol("x"),
            Expr::one(),
        ]));
    }

    #[test]
    fn substitute_inside_calls() {
        let expr = parse("sin(u) cos(u)").unwrap();
        let result = expr.substitute(&Expr::symbol("u"), &parse("2x").unwrap());
        assert_eq!(result, parse("sin(2x) cos(2x)").unwrap());
    }

    #[test]
    fn substitute_whole_subtree() {
        let expr = parse("sin(x^2) + x^2").unwrap();
        let result = expr.substitute(&parse("x^2").unwrap(), &Expr::symbol("u"));
        assert_eq!(result, parse("sin(u) + u").unwrap());
    }
}
