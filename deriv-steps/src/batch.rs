use deriv_algebra::Expr;
use rayon::prelude::*;
use crate::{explain::{explain, Explanation}, options::ExplainOptions};

/// A derivative to explain.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The expression to differentiate.
    pub expr: Expr,

    /// The variable of differentiation.
    pub symbol: String,
}

impl Request {
    /// Creates a request to differentiate `expr` with respect to `symbol`.
    pub fn new(expr: Expr, symbol: impl Into<String>) -> Self {
        Self { expr, symbol: symbol.into() }
    }
}

/// Explains every request in parallel. The explanations are returned in the order of the
/// requests.
pub fn explain_batch(requests: &[Request], options: &ExplainOptions) -> Vec<Explanation> {
    tracing::debug!(target: "steps", count = requests.len(), "explaining batch");
    requests.par_iter()
        .map(|request| explain(&request.expr, &request.symbol, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn same_as_sequential() {
        let requests = ["x^3", "sin(x) cos(x)", "tan(x) + tan(2x)", "e^(t^2)", "1/x"]
            .into_iter()
            .zip(["x", "x", "x", "t", "x"])
            .map(|(input, symbol)| Request::new(parse(input).unwrap(), symbol))
            .collect::<Vec<_>>();

        let options = ExplainOptions::default();
        let batch = explain_batch(&requests, &options);
        let sequential = requests.iter()
            .map(|request| explain(&request.expr, &request.symbol, &options))
            .collect::<Vec<_>>();
        assert_eq!(batch, sequential);
    }

    #[test]
    fn empty() {
        assert!(explain_batch(&[], &ExplainOptions::default()).is_empty());
    }
}
