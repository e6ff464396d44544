use deriv_algebra::Expr;
use crate::tree::{Derivation, Rule};
use super::Builder;

impl Builder<'_> {
    /// Builds the derivation of a product or quotient.
    ///
    /// A constant coefficient is pulled out first. What remains is differentiated with the
    /// quotient rule if it has a denominator, and with the product rule otherwise.
    pub(super) fn product(&mut self, expr: &Expr) -> Derivation {
        let (constant, other) = expr.as_independent(self.symbol);
        if !constant.is_one() {
            let substep = self.build(&other);
            return self.node(expr, Rule::ConstantTimes {
                constant,
                other,
                substep: Box::new(substep),
            });
        }

        let (numerator, denominator) = expr.as_numer_denom();
        if !denominator.is_one() {
            let numerator_step = self.build(&numerator);
            let denominator_step = self.build(&denominator);
            return self.node(expr, Rule::Quotient {
                numerator,
                denominator,
                numerator_step: Box::new(numerator_step),
                denominator_step: Box::new(denominator_step),
            });
        }

        match expr {
            Expr::Mul(terms) if terms.len() > 1 => {
                let substeps = terms.iter().map(|term| self.build(term)).collect();
                self.node(expr, Rule::Product { terms: terms.clone(), substeps })
            },
            _ => self.node(expr, Rule::Unknown),
        }
    }
}
