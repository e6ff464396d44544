//! LaTeX rendering of expressions, in the style of common computer algebra printers:
//! `\frac{d}{d x} \sin{\left(x \right)}`, `g^{2}{\left(x \right)}`, `\sqrt{x}`.

use crate::primitive::{is_integer, is_negative, rational};
use once_cell::sync::Lazy;
use rug::Rational;
use std::{collections::HashSet, fmt::{Display, Formatter, Result}};
use super::{decompose::FractionParts, fresh::FRESH_PREFIX, Expr, Primary, DERIVATIVE};

/// Names rendered as Greek letters.
static GREEK: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
        "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
        "omega",
    ]
    .into_iter()
    .collect()
});

/// Functions with a dedicated LaTeX command.
static NAMED_FUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["sin", "cos", "tan", "cot", "sec", "csc", "log"].into_iter().collect()
});

/// Functions written with `\operatorname`.
static OPERATOR_FUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["asin", "acos", "atan"].into_iter().collect()
});

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }

    /// Formats the value as a LaTeX string.
    fn to_latex(&self) -> String {
        self.as_display().to_string()
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Returns true if the function is printed as `name^{n}{\left(x \right)}` when raised to a power.
fn power_on_name(name: &str) -> bool {
    name != "log" && name != DERIVATIVE && !OPERATOR_FUNCTIONS.contains(name)
}

/// Writes a symbol name: Greek letters as commands, `f_1` as `f_{1}`.
fn fmt_name(f: &mut Formatter, name: &str) -> Result {
    if let Some(index) = name.strip_prefix(FRESH_PREFIX) {
        return write!(f, "u_{{{}}}", index);
    }
    if GREEK.contains(name) {
        return write!(f, "\\{}", name);
    }
    match name.split_once('_') {
        Some((head, sub)) if !head.is_empty() => {
            fmt_name(f, head)?;
            write!(f, "_{{{}}}", sub)
        },
        _ => write!(f, "{}", name),
    }
}

/// Writes a number, using `\frac` for non-integers.
fn fmt_number(f: &mut Formatter, n: &Rational) -> Result {
    if is_integer(n) {
        write!(f, "{}", n)
    } else {
        if is_negative(n) {
            write!(f, "- ")?;
        }
        let n = n.clone().abs();
        write!(f, "\\frac{{{}}}{{{}}}", n.numer(), n.denom())
    }
}

/// Writes the argument list of a call, as `{\left(x \right)}`.
fn fmt_args(f: &mut Formatter, args: &[Expr]) -> Result {
    write!(f, "{{\\left(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        arg.fmt_latex(f)?;
    }
    write!(f, " \\right)}}")
}

/// Writes the name of a function call, without arguments.
fn fmt_call_name(f: &mut Formatter, name: &str) -> Result {
    if NAMED_FUNCTIONS.contains(name) {
        write!(f, "\\{}", name)
    } else if OPERATOR_FUNCTIONS.contains(name) {
        write!(f, "\\operatorname{{{}}}", name)
    } else {
        fmt_name(f, name)
    }
}

fn fmt_call(f: &mut Formatter, name: &str, args: &[Expr]) -> Result {
    match (name, args) {
        (DERIVATIVE, [expr, symbol]) => {
            write!(f, "\\frac{{d}}{{d ")?;
            symbol.fmt_latex(f)?;
            write!(f, "}} ")?;
            if matches!(expr, Expr::Add(_)) {
                fmt_parens(f, expr)
            } else {
                expr.fmt_latex(f)
            }
        },
        ("log", [arg, base]) => {
            write!(f, "\\log_{{")?;
            base.fmt_latex(f)?;
            write!(f, "}}")?;
            fmt_args(f, std::slice::from_ref(arg))
        },
        _ => {
            fmt_call_name(f, name)?;
            fmt_args(f, args)
        },
    }
}

fn fmt_parens(f: &mut Formatter, expr: &Expr) -> Result {
    write!(f, "\\left(")?;
    expr.fmt_latex(f)?;
    write!(f, "\\right)")
}

/// Writes a factor of a product, parenthesizing sums.
fn fmt_factor(f: &mut Formatter, factor: &Expr) -> Result {
    match factor {
        Expr::Add(_) => fmt_parens(f, factor),
        _ => factor.fmt_latex(f),
    }
}

/// Writes the factors of a product separated by spaces, with the numeric coefficient first.
fn fmt_product(f: &mut Formatter, coeff: Option<&rug::Integer>, factors: &[Expr]) -> Result {
    let mut first = true;
    if let Some(coeff) = coeff {
        write!(f, "{}", coeff)?;
        first = false;
    }
    for factor in factors {
        if !first {
            if factor.is_number() {
                write!(f, " \\cdot ")?;
            } else {
                write!(f, " ")?;
            }
        }
        fmt_factor(f, factor)?;
        first = false;
    }
    Ok(())
}

/// Writes a product, or a power with a negative exponent, as a fraction where needed.
fn fmt_fraction(f: &mut Formatter, parts: FractionParts) -> Result {
    if is_negative(&parts.coeff) {
        write!(f, "- ")?;
    }
    let coeff = parts.coeff.abs();
    let numer_coeff = (*coeff.numer() != 1 || parts.numer.is_empty()).then(|| coeff.numer());
    let denom_coeff = (*coeff.denom() != 1).then(|| coeff.denom());

    if parts.denom.is_empty() && denom_coeff.is_none() {
        return fmt_product(f, numer_coeff, &parts.numer);
    }

    write!(f, "\\frac{{")?;
    fmt_fraction_part(f, numer_coeff, &parts.numer)?;
    write!(f, "}}{{")?;
    fmt_fraction_part(f, denom_coeff, &parts.denom)?;
    write!(f, "}}")
}

/// Writes the numerator or denominator of a `\frac`, where a lone sum needs no parentheses.
fn fmt_fraction_part(f: &mut Formatter, coeff: Option<&rug::Integer>, factors: &[Expr]) -> Result {
    match (coeff, factors) {
        (None, [factor]) => factor.fmt_latex(f),
        _ => fmt_product(f, coeff, factors),
    }
}

fn fmt_power(f: &mut Formatter, base: &Expr, exp: &Expr) -> Result {
    if let Some(n) = exp.as_number() {
        if is_negative(n) {
            return fmt_fraction(f, Expr::pow(base.clone(), exp.clone()).fraction_parts());
        }
        if !is_integer(n) && *n.numer() == 1 {
            // x^(1/2) is a square root, x^(1/3) a cube root
            write!(f, "\\sqrt")?;
            if *n != rational((1, 2)) {
                write!(f, "[{}]", n.denom())?;
            }
            write!(f, "{{")?;
            base.fmt_latex(f)?;
            return write!(f, "}}");
        }
    }

    match base {
        Expr::Primary(Primary::Call(name, args)) if power_on_name(name) => {
            fmt_call_name(f, name)?;
            write!(f, "^{{")?;
            exp.fmt_latex(f)?;
            write!(f, "}}")?;
            fmt_args(f, args)
        },
        Expr::Primary(Primary::Symbol(_)) => {
            base.fmt_latex(f)?;
            write!(f, "^{{")?;
            exp.fmt_latex(f)?;
            write!(f, "}}")
        },
        Expr::Primary(Primary::Number(n)) if is_integer(n) && !is_negative(n) => {
            write!(f, "{}^{{", n)?;
            exp.fmt_latex(f)?;
            write!(f, "}}")
        },
        _ => {
            fmt_parens(f, base)?;
            write!(f, "^{{")?;
            exp.fmt_latex(f)?;
            write!(f, "}}")
        },
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Primary::Number(n) => fmt_number(f, n),
            Primary::Symbol(sym) => fmt_name(f, sym),
            Primary::Call(name, args) => fmt_call(f, name, args),
        }
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Primary(primary) => primary.fmt_latex(f),
            Expr::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match term.neg_term() {
                        Some(negated) => {
                            write!(f, "{}", if i == 0 { "- " } else { " - " })?;
                            negated.fmt_latex(f)?;
                        },
                        None => {
                            if i > 0 {
                                write!(f, " + ")?;
                            }
                            term.fmt_latex(f)?;
                        },
                    }
                }
                Ok(())
            },
            Expr::Mul(_) => fmt_fraction(f, self.fraction_parts()),
            Expr::Exp(base, exp) => fmt_power(f, base, exp),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn latex(input: &str) -> String {
        parse(input).unwrap().to_latex()
    }

    #[test]
    fn polynomials() {
        assert_eq!(latex("3x^2 - 2x + 1"), "3 x^{2} - 2 x + 1");
        assert_eq!(latex("-x"), "- x");
    }

    #[test]
    fn fractions() {
        assert_eq!(latex("1/x"), "\\frac{1}{x}");
        assert_eq!(latex("-1/x^2"), "- \\frac{1}{x^{2}}");
        assert_eq!(latex("x/2"), "\\frac{x}{2}");
        assert_eq!(latex("3/(2x)"), "\\frac{3}{2 x}");
        assert_eq!(latex("(x + 1)/x"), "\\frac{x + 1}{x}");
    }

    #[test]
    fn functions() {
        assert_eq!(latex("sin(x)"), "\\sin{\\left(x \\right)}");
        assert_eq!(latex("sin(x)^2"), "\\sin^{2}{\\left(x \\right)}");
        assert_eq!(latex("g(x)^2"), "g^{2}{\\left(x \\right)}");
        assert_eq!(latex("log(x)^2"), "\\left(\\log{\\left(x \\right)}\\right)^{2}");
        assert_eq!(latex("log(x, 2)"), "\\log_{2}{\\left(x \\right)}");
        assert_eq!(latex("atan(x)"), "\\operatorname{atan}{\\left(x \\right)}");
    }

    #[test]
    fn roots_and_exponentials() {
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex("e^(x^2)"), "e^{x^{2}}");
        assert_eq!(latex("(x + 1)^3"), "\\left(x + 1\\right)^{3}");
        assert_eq!(latex("pi x"), "\\pi x");
    }

    #[test]
    fn derivatives() {
        let f = Expr::call("f", vec![Expr::symbol("x")]);
        let g = Expr::call("g", vec![Expr::symbol("x")]);
        assert_eq!(
            Expr::derivative_of(f.clone(), "x").to_latex(),
            "\\frac{d}{d x} f{\\left(x \\right)}",
        );
        assert_eq!(
            Expr::derivative_of(Expr::Mul(vec![f.clone(), g]), "x").to_latex(),
            "\\frac{d}{d x} f{\\left(x \\right)} g{\\left(x \\right)}",
        );
        assert_eq!(
            Expr::derivative_of(f + Expr::one(), "x").to_latex(),
            "\\frac{d}{d x} \\left(f{\\left(x \\right)} + 1\\right)",
        );
    }

    #[test]
    fn subscripted_names() {
        assert_eq!(Expr::call("f_1", vec![Expr::symbol("x")]).to_latex(), "f_{1}{\\left(x \\right)}");
        assert_eq!(Expr::symbol("_u2").to_latex(), "u_{2}");
    }
}
