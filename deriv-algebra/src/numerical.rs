//! Numeric evaluation of expressions to `f64`.

use crate::expr::{Expr, Primary, DERIVATIVE};
use std::{collections::HashMap, f64};

/// A context to use when evaluating an expression, containing the values of its variables.
#[derive(Debug, Clone)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: HashMap::from([
                ("e".to_string(), f64::consts::E),
                ("pi".to_string(), f64::consts::PI),
            ]),
        }
    }
}

impl Ctxt {
    /// Creates a new empty context.
    ///
    /// The empty context does not contain the constants `e` and `pi`. Consider using the
    /// [`Default`] implementation instead.
    pub fn new() -> Self {
        Self { vars: HashMap::new() }
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns a copy of the default context with one extra variable.
    pub fn with_var(name: &str, value: f64) -> Self {
        let mut ctxt = Self::default();
        ctxt.add_var(name, value);
        ctxt
    }
}

/// Evaluates a known function.
fn call(name: &str, args: &[f64]) -> Option<f64> {
    let value = match (name, args) {
        ("sin", [x]) => x.sin(),
        ("cos", [x]) => x.cos(),
        ("tan", [x]) => x.tan(),
        ("cot", [x]) => x.tan().recip(),
        ("sec", [x]) => x.cos().recip(),
        ("csc", [x]) => x.sin().recip(),
        ("asin", [x]) => x.asin(),
        ("acos", [x]) => x.acos(),
        ("atan", [x]) => x.atan(),
        ("log", [x]) => x.ln(),
        ("log", [x, base]) => x.ln() / base.ln(),
        _ => return None,
    };
    Some(value)
}

/// Raises `base` to the power `exp`, taking real odd roots of negative numbers.
fn power(base: f64, exp: &Expr, exp_value: f64) -> f64 {
    if base < 0.0 {
        if let Some(n) = exp.as_number() {
            if n.denom().is_odd() {
                let magnitude = (-base).powf(exp_value);
                return if n.numer().is_odd() { -magnitude } else { magnitude };
            }
        }
    }
    base.powf(exp_value)
}

impl Expr {
    /// Evaluates the expression numerically.
    ///
    /// Returns [`None`] if the expression contains a symbol without a value, an unknown function,
    /// an unevaluated derivative, or if the result is not a finite number.
    pub fn eval_f64(&self, ctxt: &Ctxt) -> Option<f64> {
        let value = match self {
            Expr::Primary(Primary::Number(n)) => n.to_f64(),
            Expr::Primary(Primary::Symbol(name)) => ctxt.get_var(name)?,
            Expr::Primary(Primary::Call(name, _)) if name == DERIVATIVE => return None,
            Expr::Primary(Primary::Call(name, args)) => {
                let args = args.iter()
                    .map(|arg| arg.eval_f64(ctxt))
                    .collect::<Option<Vec<_>>>()?;
                call(name, &args)?
            },
            Expr::Add(terms) => terms.iter()
                .map(|term| term.eval_f64(ctxt))
                .sum::<Option<f64>>()?,
            Expr::Mul(factors) => factors.iter()
                .map(|factor| factor.eval_f64(ctxt))
                .product::<Option<f64>>()?,
            Expr::Exp(base, exp) => power(base.eval_f64(ctxt)?, exp, exp.eval_f64(ctxt)?),
        };

        value.is_finite().then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use crate::parse;
    use super::*;

    #[test]
    fn polynomial() {
        let expr = parse("3x^2 - 2x + 1").unwrap();
        let value = expr.eval_f64(&Ctxt::with_var("x", 2.0)).unwrap();
        assert_float_relative_eq!(value, 9.0);
    }

    #[test]
    fn constants_and_functions() {
        let expr = parse("sin(pi/2) + ln(e^2)").unwrap();
        assert_float_relative_eq!(expr.eval_f64(&Ctxt::default()).unwrap(), 3.0);
    }

    #[test]
    fn cube_root_of_negative() {
        let expr = parse("x^(1/3)").unwrap();
        let expr = crate::simplify(&expr);
        assert_float_relative_eq!(expr.eval_f64(&Ctxt::with_var("x", -8.0)).unwrap(), -2.0);
    }

    #[test]
    fn undefined_values() {
        let expr = parse("1/x").unwrap();
        assert_eq!(expr.eval_f64(&Ctxt::with_var("x", 0.0)), None);
        assert_eq!(parse("f(x)").unwrap().eval_f64(&Ctxt::with_var("x", 1.0)), None);
        assert_eq!(parse("y").unwrap().eval_f64(&Ctxt::default()), None);
    }
}
