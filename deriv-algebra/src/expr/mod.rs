//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](deriv_parser::parser::ast::Expr) type from `deriv_parser` is a recursive `enum`
//! that mirrors the input text. It's convenient for parsing, but not so much for algebraic
//! manipulation.
//!
//! This module defines a separate [`Expr`], which flattens the AST into lists of terms and
//! factors. Subtraction is stored as addition of a term multiplied by `-1`, and division as
//! multiplication by a power with exponent `-1`. Numbers are exact rationals.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is as hard as simplification itself:
//! `x^2 + 2x + 1` and `(x + 1)^2` are equal, but only after expanding one or factoring the other.
//! Instead, the [`PartialEq`] implementation for [`Expr`] checks **strict equality**:
//!
//! - Both expressions must be the same type of expression (i.e. both [`Expr::Primary`], both
//! [`Expr::Add`], etc.).
//! - If both are [`Expr::Primary`], both must hold equal values.
//! - If both are [`Expr::Add`] or [`Expr::Mul`], both must have strictly equal terms / factors, in
//! any order.
//! - If both are [`Expr::Exp`], both must have strictly equal base and exponent.
//!
//! Strict equality never reports false positives: strictly equal expressions are always
//! mathematically equal. It is cheap, and does not depend on simplification, which makes it the
//! right tool for deciding whether terms and factors can be combined.

pub mod decompose;
pub mod fresh;
mod iter;
pub mod latex;
pub mod subst;

use crate::primitive::{int, is_negative, is_one, is_zero, rational, rational_from_str};
use deriv_parser::parser::ast::{BinOpKind, Expr as AstExpr, Literal, UnaryOpKind};
use iter::ExprIter;
use rug::Rational;
use std::{fmt, ops::{Add, AddAssign, Mul, MulAssign, Neg}};

/// Name of the unevaluated derivative call, `Derivative(f, x)`.
pub const DERIVATIVE: &str = "Derivative";

/// Names that stand for undefined functions when written as a single letter.
const FUNCTION_LETTERS: [&str; 3] = ["f", "g", "h"];

/// Returns true if a name followed by a parenthesized expression denotes multiplication rather
/// than a call, as in `x(x + 1)` or `pi(r + 1)`.
///
/// That is the case for the constants `e` and `pi`, and for single lowercase letters other than
/// the function letters `f`, `g` and `h`.
fn is_variable_name(name: &str) -> bool {
    match name {
        "e" | "pi" => true,
        _ => {
            let mut chars = name.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_lowercase())
                && !FUNCTION_LETTERS.contains(&name)
        },
    }
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact rational number, such as `2` or `3/4`.
    Number(Rational),

    /// A variable or named constant, such as `x` or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `f(x)`.
    Call(String, Vec<Expr>),
}

/// Adds two [`Primary`]s together. If both are numbers, the numbers are added together.
/// Otherwise, the two [`Primary`]s are wrapped in an [`Expr::Add`].
impl Add<Primary> for Primary {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => Expr::Primary(Primary::Number(lhs + rhs)),
            (lhs, rhs) => Expr::Add(vec![Expr::Primary(lhs), Expr::Primary(rhs)]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are numbers, the numbers are multiplied
/// together. Otherwise, the two [`Primary`]s are wrapped in an [`Expr::Mul`].
impl Mul<Primary> for Primary {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => Expr::Primary(Primary::Number(lhs * rhs)),
            (lhs, rhs) => Expr::Mul(vec![Expr::Primary(lhs), Expr::Primary(rhs)]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type **flattens** the tree structure of the AST. For example, `x + (y + z)` is stored as
/// a single [`Expr::Add`] node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a number.
    pub fn number(n: Rational) -> Self {
        Self::Primary(Primary::Number(n))
    }

    /// Creates an integer.
    pub fn integer(n: i64) -> Self {
        Self::number(rational(n))
    }

    /// The number zero.
    pub fn zero() -> Self {
        Self::integer(0)
    }

    /// The number one.
    pub fn one() -> Self {
        Self::integer(1)
    }

    /// Creates a symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates `base^exp`. No simplification is done.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates `expr^-1`. No simplification is done.
    pub fn recip(expr: Expr) -> Self {
        Self::pow(expr, Self::integer(-1))
    }

    /// Creates the unevaluated derivative `d/d(symbol) f`.
    pub fn derivative_of(f: Expr, symbol: &str) -> Self {
        Self::call(DERIVATIVE, vec![f, Self::symbol(symbol)])
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(is_zero)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(is_one)
    }

    /// Returns true if the expression is a negative number.
    pub fn is_negative_number(&self) -> bool {
        self.as_number().is_some_and(is_negative)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Call`], returns the function name and arguments.
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// If the expression is a call to the given function with a single argument, returns the
    /// argument.
    pub fn as_unary_call(&self, name: &str) -> Option<&Expr> {
        match self.as_call()? {
            (target, [arg]) if target == name => Some(arg),
            _ => None,
        }
    }

    /// Returns true if the expression is an unevaluated derivative.
    pub fn is_derivative(&self) -> bool {
        self.as_call().is_some_and(|(name, _)| name == DERIVATIVE)
    }

    /// Returns true if the given symbol appears anywhere in the expression, including inside
    /// function arguments.
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(symbol))
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::zero()
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::one()
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first). Arguments of function calls are visited before the call itself.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Counts the nodes of the expression tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }
}

/// Creates `numerator * denominator^-1`. No simplification is done.
pub fn make_fraction(numerator: Expr, denominator: Expr) -> Expr {
    numerator * Expr::recip(denominator)
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                multiset_eq(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Returns true if both slices hold strictly equal expressions with the same multiplicities, in
/// any order.
fn multiset_eq(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, candidate)| !used[i] && candidate == item);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

impl From<AstExpr> for Expr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(num) | Literal::Float(num) => Self::number(rational_from_str(&num.value)),
                Literal::Symbol(sym) => Self::symbol(sym.name),
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let mut args = call.args.into_iter().map(Self::from).collect::<Vec<_>>();
                match (call.name.name.as_str(), args.len()) {
                    ("exp", 1) => Self::pow(Self::symbol("e"), args.remove(0)),
                    ("sqrt", 1) => Self::pow(args.remove(0), Self::number(rational((1, 2)))),
                    ("ln", _) => Self::call("log", args),
                    (name, 1) if is_variable_name(name) => Self::symbol(name) * args.remove(0),
                    _ => Self::call(call.name.name, args),
                }
            },
            AstExpr::Unary(unary) => match unary.op {
                // treat this as -1 * operand
                UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => Self::pow(lhs, rhs),
                    BinOpKind::Mul => lhs * rhs,
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => make_fraction(lhs, rhs),
                    BinOpKind::Add => lhs + rhs,
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => lhs + rhs.neg(),
                }
            },
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except for the case where the operands
/// are a mix of [`Primary`] and / or [`Expr::Add`], in which case both are combined in one list
/// of terms (flattening).
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(terms)) => {
                let mut new_terms = Vec::with_capacity(terms.len() + 1);
                new_terms.push(other);
                new_terms.extend(terms);
                Self::Add(new_terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::zero());
        *self = lhs + rhs;
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`Expr::Mul`], in which case both are combined in
/// one list of factors (flattening).
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(factors)) => {
                let mut new_factors = Vec::with_capacity(factors.len() + 1);
                new_factors.push(other);
                new_factors.extend(factors);
                Self::Mul(new_factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::one());
        *self = lhs * rhs;
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::number(-n),
            expr => Self::number(rational(int(-1))) * expr,
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) if name == DERIVATIVE && args.len() == 2 => {
                write!(f, "d/d{}({})", args[1], args[0])
            },
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Plain-text rendering, using `/` for denominators and ` - ` for negative terms.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    match term.neg_term() {
                        Some(negated) => write!(f, "-{}", negated)?,
                        None => write!(f, "{}", term)?,
                    }
                    for term in iter {
                        match term.neg_term() {
                            Some(negated) => write!(f, " - {}", negated)?,
                            None => write!(f, " + {}", term)?,
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(_) => fmt_fraction(f, self),
            Self::Exp(base, exp) => {
                if exp.as_number().is_some_and(is_negative) {
                    return fmt_fraction(f, self);
                }
                if exp.as_number().is_some_and(|n| *n == rational((1, 2))) {
                    return write!(f, "sqrt({})", base);
                }
                fmt_power_operand(f, base)?;
                write!(f, "^")?;
                fmt_power_operand(f, exp)
            },
        }
    }
}

/// Writes a product or a power with a negative exponent as `numerator/denominator`.
fn fmt_fraction(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    let parts = expr.fraction_parts();
    if is_negative(&parts.coeff) {
        write!(f, "-")?;
    }

    let coeff = parts.coeff.abs();
    let mut numer = Vec::new();
    if *coeff.numer() != 1 || parts.numer.is_empty() {
        numer.push(Expr::number(Rational::from(coeff.numer().clone())));
    }
    numer.extend(parts.numer);
    let mut denom = Vec::new();
    if *coeff.denom() != 1 {
        denom.push(Expr::number(Rational::from(coeff.denom().clone())));
    }
    denom.extend(parts.denom);

    fmt_product(f, &numer)?;
    if !denom.is_empty() {
        write!(f, "/")?;
        if denom.len() == 1 && !matches!(denom[0], Expr::Add(_)) {
            fmt_product(f, &denom)?;
        } else {
            write!(f, "(")?;
            fmt_product(f, &denom)?;
            write!(f, ")")?;
        }
    }
    Ok(())
}

/// Writes the factors joined with `*`, parenthesizing sums.
fn fmt_product(f: &mut fmt::Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let mut iter = factors.iter();
    if let Some(factor) = iter.next() {
        fmt_factor(f, factor)?;
        for factor in iter {
            write!(f, "*")?;
            fmt_factor(f, factor)?;
        }
    }
    Ok(())
}

fn fmt_factor(f: &mut fmt::Formatter<'_>, factor: &Expr) -> fmt::Result {
    match factor {
        Expr::Add(_) => write!(f, "({})", factor),
        Expr::Primary(Primary::Number(n)) if !crate::primitive::is_integer(n) => write!(f, "({})", n),
        _ => write!(f, "{}", factor),
    }
}

/// Writes the base or exponent of a power, parenthesizing anything that is not a plain symbol,
/// call or non-negative integer.
fn fmt_power_operand(f: &mut fmt::Formatter<'_>, operand: &Expr) -> fmt::Result {
    let bare = match operand {
        Expr::Primary(Primary::Number(n)) => crate::primitive::is_integer(n) && !is_negative(n),
        Expr::Primary(_) => true,
        _ => false,
    };
    if bare {
        write!(f, "{}", operand)
    } else {
        write!(f, "({})", operand)
    }
}

/// The output of `pretty_assertions` for failing tests can be misleading, because strict equality
/// allows different orderings of terms and factors while the printed diff does not.
#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn strict_equality() {
        let a = parse("2(x + (y - 5))").unwrap();
        let b = parse("(y - 5 + x) * 2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse("2(x + (y - 5))").unwrap();
        let b = parse("2x + 2y - 10").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_respects_multiplicity() {
        let a = Expr::Mul(vec![x(), x(), Expr::symbol("y")]);
        let b = Expr::Mul(vec![x(), Expr::symbol("y"), Expr::symbol("y")]);
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse("x^2 + 5x + 6").unwrap();
        assert_eq!(expr, Expr::Add(vec![
            Expr::pow(x(), Expr::integer(2)),
            Expr::Mul(vec![Expr::integer(5), x()]),
            Expr::integer(6),
        ]));
    }

    #[test]
    fn division_and_negation() {
        let expr = parse("-2x/5").unwrap();
        assert_eq!(expr, Expr::Mul(vec![
            Expr::integer(-2),
            x(),
            Expr::recip(Expr::integer(5)),
        ]));
    }

    #[test]
    fn reciprocal_keeps_unit_numerator() {
        let expr = parse("1/x").unwrap();
        assert_eq!(expr, Expr::Mul(vec![Expr::one(), Expr::recip(x())]));
    }

    #[test]
    fn function_aliases() {
        assert_eq!(parse("exp(x)").unwrap(), Expr::pow(Expr::symbol("e"), x()));
        assert_eq!(parse("sqrt(x)").unwrap(), Expr::pow(x(), Expr::number(rational((1, 2)))));
        assert_eq!(parse("ln(x)").unwrap(), Expr::call("log", vec![x()]));
    }

    #[test]
    fn variable_before_parenthesis_multiplies() {
        assert_eq!(parse("x(x + 1)").unwrap(), Expr::Mul(vec![
            x(),
            Expr::Add(vec![x(), Expr::integer(1)]),
        ]));
        assert_eq!(parse("pi(x + 1)").unwrap(), parse("pi * (x + 1)").unwrap());
        assert_eq!(parse("e(2)").unwrap(), parse("e * 2").unwrap());
        assert_eq!(parse("a(x)").unwrap(), parse("a x").unwrap());
    }

    #[test]
    fn function_names_stay_calls() {
        assert_eq!(parse("f(x)").unwrap(), Expr::call("f", vec![x()]));
        assert_eq!(parse("g(x^2)").unwrap().as_call().map(|(name, _)| name), Some("g"));
        assert_eq!(parse("F(x)").unwrap(), Expr::call("F", vec![x()]));
        assert_eq!(parse("x(1, 2)").unwrap(), Expr::call("x", vec![Expr::integer(1), Expr::integer(2)]));
    }

    #[test]
    fn contains_symbol_in_arguments() {
        let expr = parse("3 sin(2x)").unwrap();
        assert!(expr.contains_symbol("x"));
        assert!(!expr.contains_symbol("y"));
    }

    #[test]
    fn display() {
        assert_eq!(parse("x^2 - 3x + 1/2").unwrap().to_string(), "x^2 - 3*x + 1/2");
        assert_eq!(parse("-sin(x)/x^2").unwrap().to_string(), "-sin(x)/x^2");
        assert_eq!(parse("sqrt(x + 1)").unwrap().to_string(), "sqrt(x + 1)");
        assert_eq!(parse("e^(2x)").unwrap().to_string(), "e^(2*x)");
        assert_eq!(Expr::derivative_of(x(), "x").to_string(), "d/dx(x)");
    }
}
