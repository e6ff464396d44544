//! Functions to construct and inspect [`Integer`]s and [`Rational`]s.

use rug::{ops::Pow, Integer, Rational};
use std::cmp::Ordering;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Rational`] from a decimal literal such as `12` or `0.25`, exactly.
///
/// The tokenizer only ever produces ASCII digits with at most one decimal point, so any other
/// character is ignored.
pub fn rational_from_str(s: &str) -> Rational {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let numer = whole
        .chars()
        .chain(frac.chars())
        .filter_map(|c| c.to_digit(10))
        .fold(Integer::new(), |acc, digit| acc * 10 + digit);
    let denom = int(10).pow(frac.len() as u32);
    Rational::from((numer, denom))
}

/// Returns true if the number is zero.
pub fn is_zero(n: &Rational) -> bool {
    n.cmp0() == Ordering::Equal
}

/// Returns true if the number is one.
pub fn is_one(n: &Rational) -> bool {
    *n.numer() == 1 && *n.denom() == 1
}

/// Returns true if the number is strictly negative.
pub fn is_negative(n: &Rational) -> bool {
    n.cmp0() == Ordering::Less
}

/// Returns true if the number has no fractional part.
pub fn is_integer(n: &Rational) -> bool {
    *n.denom() == 1
}

/// Returns the number as an `i32` if it is an integer that fits.
pub fn to_i32(n: &Rational) -> Option<i32> {
    if is_integer(n) {
        n.numer().to_i32()
    } else {
        None
    }
}

/// Raises a rational number to an integer power. Returns [`None`] for `0` raised to a negative
/// power.
pub fn pow_int(base: &Rational, exp: i32) -> Option<Rational> {
    if exp < 0 && is_zero(base) {
        return None;
    }

    let (numer, denom) = base.clone().into_numer_denom();
    let e = exp.unsigned_abs();
    let result = Rational::from((numer.pow(e), denom.pow(e)));
    Some(if exp < 0 { result.recip() } else { result })
}

/// Returns the exact `n`-th root of a non-negative rational number, if there is one.
pub fn exact_root(base: &Rational, n: u32) -> Option<Rational> {
    if is_negative(base) || n == 0 {
        return None;
    }

    let root_of = |value: &Integer| {
        let root = value.clone().root(n);
        (root.clone().pow(n) == *value).then_some(root)
    };
    let numer = root_of(base.numer())?;
    let denom = root_of(base.denom())?;
    Some(Rational::from((numer, denom)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal_literals_are_exact() {
        assert_eq!(rational_from_str("0.25"), rational((1, 4)));
        assert_eq!(rational_from_str("12"), rational(12));
        assert_eq!(rational_from_str(".5"), rational((1, 2)));
    }

    #[test]
    fn integer_powers() {
        assert_eq!(pow_int(&rational((2, 3)), 2), Some(rational((4, 9))));
        assert_eq!(pow_int(&rational(2), -3), Some(rational((1, 8))));
        assert_eq!(pow_int(&rational(0), -1), None);
    }

    #[test]
    fn roots() {
        assert_eq!(exact_root(&rational((4, 9)), 2), Some(rational((2, 3))));
        assert_eq!(exact_root(&rational(2), 2), None);
        assert_eq!(exact_root(&rational(27), 3), Some(rational(3)));
    }
}
