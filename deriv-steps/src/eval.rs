//! Evaluation of a derivation tree into the derivative it describes.

use deriv_algebra::{derivative, simplify, trigsimp, Expr};
use crate::tree::{Derivation, Rule};

/// Returns the derivative described by the tree.
///
/// Each node applies the identity of its rule to the evaluated substeps, and the result is
/// simplified. Leaves whose identity is a single formula ([`Rule::Power`], [`Rule::Trig`], etc.)
/// are differentiated natively, so the results always agree with
/// [`deriv_algebra::derivative`].
pub fn evaluate(tree: &Derivation) -> Expr {
    let Derivation { context, symbol, rule } = tree;

    let result = match rule {
        Rule::Constant => Expr::zero(),
        Rule::ConstantTimes { constant, substep, .. } => constant.clone() * evaluate(substep),
        Rule::Power { .. }
        | Rule::Exponential { .. }
        | Rule::Logarithm { .. }
        | Rule::Function
        | Rule::Unknown => derivative(context, symbol),
        Rule::Sum { substeps } => Expr::Add(substeps.iter().map(evaluate).collect()),
        Rule::Product { terms, substeps } => {
            let derivatives = substeps.iter().map(evaluate).collect::<Vec<_>>();
            let terms = (0..terms.len())
                .map(|i| {
                    let mut factors = vec![derivatives[i].clone()];
                    factors.extend(terms.iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(_, term)| term.clone()));
                    Expr::Mul(factors)
                })
                .collect();
            Expr::Add(terms)
        },
        Rule::Quotient { numerator, denominator, numerator_step, denominator_step } => {
            // (g f' - f g') / g^2
            let numer = Expr::Add(vec![
                denominator.clone() * evaluate(numerator_step),
                -(numerator.clone() * evaluate(denominator_step)),
            ]);
            numer * Expr::recip(Expr::pow(denominator.clone(), Expr::integer(2)))
        },
        Rule::Chain { outer, inner, variable, inner_step } => {
            evaluate(outer).substitute(&Expr::symbol(variable.clone()), inner) * evaluate(inner_step)
        },
        Rule::Trig { .. } => return trigsimp(&simplify(&derivative(context, symbol))),
        Rule::Rewrite { substep, .. } => return evaluate(substep),
        Rule::Alternative { candidates } => match candidates.first() {
            Some(canonical) => return evaluate(canonical),
            None => derivative(context, symbol),
        },
    };

    let result = simplify(&result);
    tracing::trace!(target: "steps", expr = %context, derivative = %result, "evaluated");
    result
}
