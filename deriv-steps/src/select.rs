//! Choosing the differentiation rule for an expression.

use deriv_algebra::Expr;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// The trigonometric functions with a dedicated rule.
pub const TRIG_FUNCTIONS: [&str; 6] = ["sin", "cos", "tan", "csc", "sec", "cot"];

/// Every function the algebra knows how to differentiate. Calls to anything else are undefined
/// functions.
static KNOWN_FUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    TRIG_FUNCTIONS.iter()
        .copied()
        .chain(["log", "asin", "acos", "atan"])
        .collect()
});

/// The rule builder chosen for an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// A trigonometric function applied to an argument.
    Trig,

    /// An application of an undefined function.
    Function,

    /// An expression that does not depend on the variable.
    Constant,

    /// A power, an exponential, or the variable itself.
    Power,

    /// A sum.
    Sum,

    /// A product or a quotient.
    Product,

    /// A logarithm, in any base.
    Logarithm,

    /// Anything else.
    Unknown,
}

/// If the expression is a trigonometric function of a single argument, returns the name of the
/// function and its argument.
pub fn as_trig_call(expr: &Expr) -> Option<(&str, &Expr)> {
    match expr.as_call()? {
        (name, [arg]) if TRIG_FUNCTIONS.contains(&name) => Some((name, arg)),
        _ => None,
    }
}

/// Returns true if the expression is a call to a function the algebra cannot differentiate,
/// such as `f(x)`.
pub fn is_undefined_call(expr: &Expr) -> bool {
    expr.as_call().is_some_and(|(name, _)| !KNOWN_FUNCTIONS.contains(name))
}

/// Classifies the expression into exactly one [`RuleKind`]. The first matching case wins:
///
/// 1. trigonometric functions;
/// 2. undefined functions;
/// 3. expressions free of `symbol`;
/// 4. the shape of the expression: powers with a negative numeric exponent are quotients, other
///    powers and the variable itself use the power rule, then sums, products and logarithms;
/// 5. [`RuleKind::Unknown`].
pub fn select(expr: &Expr, symbol: &str) -> RuleKind {
    if as_trig_call(expr).is_some() {
        return RuleKind::Trig;
    }

    if is_undefined_call(expr) {
        return RuleKind::Function;
    }

    if !expr.contains_symbol(symbol) {
        return RuleKind::Constant;
    }

    match expr {
        Expr::Exp(_, exp) if exp.is_negative_number() => RuleKind::Product,
        Expr::Exp(..) => RuleKind::Power,
        Expr::Add(_) => RuleKind::Sum,
        Expr::Mul(_) => RuleKind::Product,
        _ if expr.as_symbol().is_some() => RuleKind::Power,
        _ => match expr.as_call() {
            Some(("log", [_] | [_, _])) => RuleKind::Logarithm,
            _ => RuleKind::Unknown,
        },
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use super::*;

    fn kind(input: &str) -> RuleKind {
        select(&parse(input).unwrap(), "x")
    }

    #[test]
    fn shapes() {
        assert_eq!(kind("x"), RuleKind::Power);
        assert_eq!(kind("x^3"), RuleKind::Power);
        assert_eq!(kind("e^(x^2)"), RuleKind::Power);
        assert_eq!(kind("x^2 + 1"), RuleKind::Sum);
        assert_eq!(kind("x sin(x)"), RuleKind::Product);
        assert_eq!(kind("1/x"), RuleKind::Product);
        assert_eq!(kind("ln(x)"), RuleKind::Logarithm);
        assert_eq!(kind("log(x, 2)"), RuleKind::Logarithm);
        assert_eq!(kind("asin(x)"), RuleKind::Unknown);
    }

    #[test]
    fn precedence() {
        // trigonometric functions and undefined functions come before constants
        assert_eq!(kind("sin(2)"), RuleKind::Trig);
        assert_eq!(kind("f(2)"), RuleKind::Function);
        assert_eq!(kind("f(x)"), RuleKind::Function);
        assert_eq!(kind("y^2"), RuleKind::Constant);
        assert_eq!(kind("ln(3)"), RuleKind::Constant);
    }

    #[test]
    fn variable_before_parenthesis() {
        assert_eq!(kind("x(x + 1)"), RuleKind::Product);
        assert_eq!(kind("pi(x + 1)"), RuleKind::Product);
        assert_eq!(kind("g(x + 1)"), RuleKind::Function);
    }
}
