//! Simplification rules for function calls: values of the trigonometric functions at multiples of
//! `pi`, symmetry of odd and even functions, and logarithm identities.

use crate::{
    primitive::is_integer,
    simplify::rules::do_call,
};
use rug::Integer;
use super::Expr;

/// Functions with `f(-a) = -f(a)`.
const ODD: [&str; 6] = ["sin", "tan", "cot", "csc", "asin", "atan"];

/// Functions with `f(-a) = f(a)`.
const EVEN: [&str; 2] = ["cos", "sec"];

/// If the expression is an integer multiple of `pi` (including zero), returns the multiple.
fn pi_multiple(expr: &Expr) -> Option<Integer> {
    if let Some(n) = expr.as_number() {
        return n.cmp0().is_eq().then(Integer::new);
    }

    let (coeff, rest) = expr.as_coeff_factors();
    match rest.as_slice() {
        [pi] if pi.as_symbol() == Some("pi") && is_integer(&coeff) => {
            Some(coeff.into_numer_denom().0)
        },
        _ => None,
    }
}

/// `sin(k*pi) = 0`
pub fn sin(expr: &Expr) -> Option<Expr> {
    do_call(expr, "sin", |args| {
        let [arg] = args else {
            return None;
        };
        pi_multiple(arg).map(|_| Expr::zero())
    })
}

/// `cos(k*pi) = (-1)^k`
pub fn cos(expr: &Expr) -> Option<Expr> {
    do_call(expr, "cos", |args| {
        let [arg] = args else {
            return None;
        };
        let k = pi_multiple(arg)?;
        Some(if k.is_even() { Expr::one() } else { Expr::integer(-1) })
    })
}

/// `tan(k*pi) = 0`
pub fn tan(expr: &Expr) -> Option<Expr> {
    do_call(expr, "tan", |args| {
        let [arg] = args else {
            return None;
        };
        pi_multiple(arg).map(|_| Expr::zero())
    })
}

/// Pulls a negative coefficient out of the argument of an odd or even function.
///
/// `sin(-a) = -sin(a)`
/// `cos(-a) = cos(a)`
pub fn symmetry(expr: &Expr) -> Option<Expr> {
    let (name, args) = expr.as_call()?;
    let [arg] = args else {
        return None;
    };

    let odd = ODD.contains(&name);
    if !odd && !EVEN.contains(&name) {
        return None;
    }

    let positive = arg.neg_term()?;
    let call = Expr::call(name, vec![positive]);
    Some(if odd { -call } else { call })
}

/// `log(1) = 0`
/// `log(e) = 1`
/// `log(e^a) = a`
/// `log(a, e) = log(a)`
/// `log(b, b) = 1`
pub fn log(expr: &Expr) -> Option<Expr> {
    do_call(expr, "log", |args| match args {
        [arg] => {
            if arg.is_one() {
                Some(Expr::zero())
            } else if arg.as_symbol() == Some("e") {
                Some(Expr::one())
            } else if let Expr::Exp(base, exp) = arg {
                (base.as_symbol() == Some("e")).then(|| (**exp).clone())
            } else {
                None
            }
        },
        [arg, base] => {
            if arg.is_one() {
                Some(Expr::zero())
            } else if arg == base {
                Some(Expr::one())
            } else if base.as_symbol() == Some("e") {
                Some(Expr::call("log", vec![arg.clone()]))
            } else {
                None
            }
        },
        _ => None,
    })
}

/// Applies all function call rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    sin(expr)
        .or_else(|| cos(expr))
        .or_else(|| tan(expr))
        .or_else(|| symmetry(expr))
        .or_else(|| log(expr))
}

#[cfg(test)]
mod tests {
    use crate::{parse, primitive::rational};
    use pretty_assertions::assert_eq;
    use super::*;

    fn times_pi(k: i32) -> Expr {
        Expr::number(rational(k)) * Expr::symbol("pi")
    }

    #[test]
    fn multiples_of_pi() {
        let sin_3pi = Expr::call("sin", vec![times_pi(3)]);
        assert_eq!(sin(&sin_3pi), Some(Expr::zero()));

        let cos_3pi = Expr::call("cos", vec![times_pi(3)]);
        assert_eq!(cos(&cos_3pi), Some(Expr::integer(-1)));

        let cos_2pi = Expr::call("cos", vec![times_pi(2)]);
        assert_eq!(cos(&cos_2pi), Some(Expr::one()));

        assert_eq!(sin(&parse("sin(x)").unwrap()), None);
    }

    #[test]
    fn odd_and_even() {
        assert_eq!(symmetry(&parse("sin(-x)").unwrap()), Some(parse("-sin(x)").unwrap()));
        assert_eq!(symmetry(&parse("cos(-2x)").unwrap()), Some(parse("cos(2x)").unwrap()));
        assert_eq!(symmetry(&parse("f(-x)").unwrap()), None);
    }

    #[test]
    fn logarithms() {
        assert_eq!(log(&parse("ln(1)").unwrap()), Some(Expr::zero()));
        assert_eq!(log(&parse("ln(e)").unwrap()), Some(Expr::one()));
        assert_eq!(log(&parse("ln(e^(2x))").unwrap()), Some(parse("2x").unwrap()));
        assert_eq!(log(&parse("log(x, e)").unwrap()), Some(parse("ln(x)").unwrap()));
        assert_eq!(log(&parse("log(2, 2)").unwrap()), Some(Expr::one()));
    }
}
