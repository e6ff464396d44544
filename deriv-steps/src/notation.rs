//! Disambiguation of the derivative notation in rendered LaTeX.
//!
//! The LaTeX printer writes the derivative of a product without parentheses, so
//! `\frac{d}{d x} f{\left(x \right)} g{\left(x \right)}` can be read as either `(f g)'` or
//! `f' g`. The product and quotient rule formulas are exactly where this matters, so their
//! derivatives of `f`, `g` and `h` are rewritten with explicit parentheses.

use deriv_algebra::{expr::make_fraction, Expr, Latex};

/// The expressions whose derivatives are parenthesized, longest first.
fn ambiguous_operands(symbol: &str) -> Vec<Expr> {
    let [f, g, h] = ["f", "g", "h"].map(|name| Expr::call(name, vec![Expr::symbol(symbol)]));
    vec![
        Expr::Mul(vec![f.clone(), g.clone(), h.clone()]),
        Expr::Mul(vec![f.clone(), g.clone()]),
        make_fraction(f.clone(), g.clone()),
        f,
        g,
        h,
    ]
}

/// Parenthesizes the operands of `\frac{d}{d x}` in the product and quotient rule formulas.
///
/// Only the literal LaTeX written for the functions `f`, `g` and `h` of the given variable is
/// affected; any other text is left as is.
pub fn normalize_notation(text: &str, symbol: &str) -> String {
    let prefix = format!("\\frac{{d}}{{d {}}}", Expr::symbol(symbol).to_latex());
    ambiguous_operands(symbol)
        .into_iter()
        .fold(text.to_owned(), |text, operand| {
            let pattern = Expr::derivative_of(operand.clone(), symbol).to_latex();
            let replacement = format!("{}( {})", prefix, operand.to_latex());
            text.replace(&pattern, &replacement)
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn product() {
        assert_eq!(
            normalize_notation(r"\frac{d}{d x} f{\left(x \right)} g{\left(x \right)} = g{\left(x \right)} \frac{d}{d x} f{\left(x \right)}", "x"),
            r"\frac{d}{d x}( f{\left(x \right)} g{\left(x \right)}) = g{\left(x \right)} \frac{d}{d x}( f{\left(x \right)})",
        );
    }

    #[test]
    fn quotient() {
        assert_eq!(
            normalize_notation(r"\frac{d}{d x} \frac{f{\left(x \right)}}{g{\left(x \right)}}", "x"),
            r"\frac{d}{d x}( \frac{f{\left(x \right)}}{g{\left(x \right)}})",
        );
    }

    #[test]
    fn quotient_rule_formula() {
        assert_eq!(
            normalize_notation(
                r"\frac{- f{\left(x \right)} \frac{d}{d x} g{\left(x \right)} + g{\left(x \right)} \frac{d}{d x} f{\left(x \right)}}{g^{2}{\left(x \right)}}",
                "x",
            ),
            r"\frac{- f{\left(x \right)} \frac{d}{d x}( g{\left(x \right)}) + g{\left(x \right)} \frac{d}{d x}( f{\left(x \right)})}{g^{2}{\left(x \right)}}",
        );
    }

    #[test]
    fn other_variable() {
        assert_eq!(
            normalize_notation(r"\frac{d}{d t} f{\left(t \right)}", "t"),
            r"\frac{d}{d t}( f{\left(t \right)})",
        );
        assert_eq!(
            normalize_notation(r"\frac{d}{d x} f{\left(x \right)}", "t"),
            r"\frac{d}{d x} f{\left(x \right)}",
        );
    }

    #[test]
    fn idempotent() {
        let once = normalize_notation(r"\frac{d}{d x} f{\left(x \right)} g{\left(x \right)} h{\left(x \right)}", "x");
        assert_eq!(once, r"\frac{d}{d x}( f{\left(x \right)} g{\left(x \right)} h{\left(x \right)})");
        assert_eq!(normalize_notation(&once, "x"), once);
    }
}
