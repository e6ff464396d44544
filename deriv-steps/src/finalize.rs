//! The simplification cascade applied to the derivative once the explanation is rendered.

use deriv_algebra::{expand, factor, simplify, trigsimp, Expr};
use std::fmt;

/// A simplification pass with a name, for logging.
#[derive(Clone, Copy)]
pub struct NamedPass {
    /// Name of the pass.
    pub name: &'static str,

    /// The pass itself.
    pub run: fn(&Expr) -> Expr,
}

impl NamedPass {
    /// Algebraic simplification.
    pub const SIMPLIFY: Self = Self { name: "simplify", run: simplify };

    /// Simplification with trigonometric identities.
    pub const TRIGSIMP: Self = Self { name: "trigsimp", run: trigsimp };

    /// Extraction of common factors.
    pub const FACTOR: Self = Self { name: "factor", run: factor };

    /// Distribution of products over sums.
    pub const EXPAND: Self = Self { name: "expand", run: expand };
}

impl fmt::Debug for NamedPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered pipelines of simplification passes.
///
/// The pipelines are tried in order on the raw derivative. The output of the first pipeline that
/// changes the derivative becomes the answer.
#[derive(Debug, Clone)]
pub struct SimplifyCascade {
    pipelines: Vec<Vec<NamedPass>>,
}

impl Default for SimplifyCascade {
    /// `simplify, trigsimp, factor`, then `expand, trigsimp, factor`.
    fn default() -> Self {
        Self::empty()
            .then(vec![NamedPass::SIMPLIFY, NamedPass::TRIGSIMP, NamedPass::FACTOR])
            .then(vec![NamedPass::EXPAND, NamedPass::TRIGSIMP, NamedPass::FACTOR])
    }
}

impl SimplifyCascade {
    /// A cascade without pipelines. The raw derivative is always the answer.
    pub fn empty() -> Self {
        Self { pipelines: Vec::new() }
    }

    /// Appends a pipeline to the cascade.
    pub fn then(mut self, pipeline: Vec<NamedPass>) -> Self {
        self.pipelines.push(pipeline);
        self
    }

    /// Returns the output of the first pipeline that changes the expression, or [`None`] if no
    /// pipeline does.
    pub fn apply(&self, raw: &Expr) -> Option<Expr> {
        for pipeline in &self.pipelines {
            let result = pipeline.iter().fold(raw.clone(), |expr, pass| (pass.run)(&expr));
            if result != *raw {
                tracing::debug!(target: "steps", ?pipeline, raw = %raw, result = %result, "simplified answer");
                return Some(result);
            }
        }

        tracing::debug!(target: "steps", raw = %raw, "answer left as is");
        None
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn first_changing_pipeline_wins() {
        let raw = parse("cos(x)^2 - sin(x)^2").unwrap();
        assert_eq!(SimplifyCascade::default().apply(&raw), Some(parse("cos(2x)").unwrap()));
    }

    #[test]
    fn second_pipeline() {
        let raw = parse("x(x + 1)").unwrap();
        let cascade = SimplifyCascade::empty()
            .then(vec![NamedPass::TRIGSIMP])
            .then(vec![NamedPass::EXPAND]);
        assert_eq!(cascade.apply(&raw), Some(parse("x^2 + x").unwrap()));
    }

    #[test]
    fn unchanged() {
        let raw = parse("x").unwrap();
        assert_eq!(SimplifyCascade::default().apply(&raw), None);
        assert_eq!(SimplifyCascade::empty().apply(&raw), None);
        assert_eq!(SimplifyCascade::default().pipelines.len(), 2);
    }
}
