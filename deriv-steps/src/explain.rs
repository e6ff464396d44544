//! The entry points that explain a derivative and write the explanation as text.

use deriv_algebra::{factor, numerical::Ctxt, simplify, Expr, Latex};
use deriv_error::{impl_error_kind, Error};
use crate::{
    build::build,
    notation::normalize_notation,
    options::{ExplainOptions, OutputFormat},
    render::{render_with, Block, Document, Math, Span},
    select::is_undefined_call,
    tree::Derivation,
};

/// The explanation of a derivative.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    /// The differentiated expression.
    pub expr: Expr,

    /// The variable of differentiation.
    pub symbol: String,

    /// How the derivative was found.
    pub derivation: Derivation,

    /// The rendered explanation.
    pub document: Document,

    /// The explanation written in the requested format.
    pub text: String,
}

impl Explanation {
    /// The derivative, as evaluated from the derivation.
    pub fn derivative(&self) -> &Expr {
        &self.document.derivative
    }

    /// The simplified derivative.
    pub fn answer(&self) -> &Expr {
        &self.document.answer
    }
}

/// Explains the derivative of `expr` with respect to `symbol`.
///
/// With [`OutputFormat::Html`], the text begins with the derivative to find (unless
/// [`ExplainOptions::header`] is off) and the derivative notation is normalized (unless
/// [`ExplainOptions::normalize_notation`] is off).
pub fn explain(expr: &Expr, symbol: &str, options: &ExplainOptions) -> Explanation {
    let derivation = build(expr, symbol);
    let document = render_with(&derivation, &options.cascade);
    let text = write(expr, symbol, &document, options);
    tracing::debug!(
        target: "steps",
        expr = %expr,
        nodes = derivation.size(),
        answer = %document.answer,
        "explained derivative",
    );

    Explanation {
        expr: expr.clone(),
        symbol: symbol.to_owned(),
        derivation,
        document,
        text,
    }
}

fn write(expr: &Expr, symbol: &str, document: &Document, options: &ExplainOptions) -> String {
    let body = options.format.writer().write_document(document);
    match options.format {
        OutputFormat::Plain => body,
        OutputFormat::Html => {
            let text = if options.header {
                format!(
                    "Find: $${}$$<br><br>{}",
                    Expr::derivative_of(expr.clone(), symbol).to_latex(),
                    body,
                )
            } else {
                body
            };

            if options.normalize_notation {
                normalize_notation(&text, symbol)
            } else {
                text
            }
        },
    }
}

/// Explains successive derivatives of `expr`, up to the given order.
///
/// Every derivative after the first differentiates the factored answer of the previous one.
pub fn explain_higher(expr: &Expr, symbol: &str, order: usize, options: &ExplainOptions) -> Vec<Explanation> {
    let mut explanations: Vec<Explanation> = Vec::with_capacity(order);
    for _ in 0..order {
        let explanation = match explanations.last() {
            None => explain(expr, symbol, options),
            Some(previous) => {
                let mut explanation = explain(&factor(previous.answer()), symbol, options);
                let separator = match options.format {
                    OutputFormat::Plain => "Next derivative\n\n",
                    OutputFormat::Html => "<br/>Next derivative<br/>",
                };
                explanation.text.insert_str(0, separator);
                explanation
            },
        };
        explanations.push(explanation);
    }
    explanations
}

/// The function whose value at the tangent point is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TangentFunction {
    /// The function itself.
    Function,

    /// Its derivative.
    Derivative,
}

/// The function or its derivative has no value at the requested point.
#[derive(Debug, Clone, PartialEq)]
pub struct TangentError {
    /// The function with no value.
    pub function: TangentFunction,

    /// The requested point.
    pub point: Expr,
}

impl_error_kind!(TangentError, |this| {
    message = format!(
        "the {} is undefined at {}",
        match this.function {
            TangentFunction::Function => "function",
            TangentFunction::Derivative => "derivative",
        },
        this.point,
    ),
    labels = ["this point"],
    help = "the tangent line only exists where the function and its derivative are defined",
});

/// The tangent line of a function at a point, with the explanation of how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct TangentLine {
    /// The explanation of the derivative.
    pub explanation: Explanation,

    /// The point of tangency, `x0`.
    pub point: Expr,

    /// The value of the function at the point, `f(x0)`.
    pub value: Expr,

    /// The slope of the line, `f'(x0)`.
    pub slope: Expr,

    /// The intercept of the line `y = slope*x + intercept`.
    pub intercept: Expr,

    /// The justification of the coefficients, written in the requested format.
    pub justification: String,
}

impl TangentLine {
    /// The right-hand side of `y = slope*x + intercept`.
    pub fn line(&self, symbol: &str) -> Expr {
        simplify(&(self.slope.clone() * Expr::symbol(symbol) + self.intercept.clone()))
    }
}

/// Returns true if the expression is a number with no value, such as `1/0` or `log(0)`.
///
/// Expressions with free symbols or undefined functions cannot be decided and are assumed to be
/// defined.
fn is_undefined(expr: &Expr) -> bool {
    let mut closed = true;
    for node in expr.post_order_iter() {
        match node {
            Expr::Exp(base, exp) if base.is_zero() && exp.is_negative_number() => return true,
            _ if node.as_symbol().is_some_and(|name| name != "e" && name != "pi") => closed = false,
            _ if is_undefined_call(node) => closed = false,
            _ => (),
        }
    }

    closed && expr.eval_f64(&Ctxt::default()).is_none()
}

/// Explains the tangent line of `expr` at `symbol = point`.
///
/// Returns an error if the function or its derivative is undefined at the point.
pub fn tangent_line(
    expr: &Expr,
    symbol: &str,
    point: &Expr,
    options: &ExplainOptions,
) -> Result<TangentLine, Error> {
    let explanation = explain(expr, symbol, options);
    let variable = Expr::symbol(symbol);

    let at_point = expr.substitute(&variable, point);
    let value = simplify(&at_point);
    if is_undefined(&value) {
        return Err(Error::new(Vec::new(), TangentError {
            function: TangentFunction::Function,
            point: point.clone(),
        }));
    }

    let slope_at_point = explanation.answer().substitute(&variable, point);
    let slope = simplify(&slope_at_point);
    if is_undefined(&slope) {
        return Err(Error::new(Vec::new(), TangentError {
            function: TangentFunction::Derivative,
            point: point.clone(),
        }));
    }

    // y - f(x0) = f'(x0) (x - x0)  =>  b = f(x0) - f'(x0) x0
    let intercept = simplify(&(value.clone() + -(slope.clone() * point.clone())));
    let line = simplify(&(slope.clone() * variable + intercept.clone()));
    tracing::debug!(target: "steps", point = %point, value = %value, slope = %slope, "tangent line");

    let blocks = justification(symbol, point, [&at_point, &value], [&slope_at_point, &slope], &line);
    let justification = options.format.writer()
        .write_blocks(&blocks)
        .replace("+-", "-")
        .replace("--", "+");

    Ok(TangentLine {
        explanation,
        point: point.clone(),
        value,
        slope,
        intercept,
        justification,
    })
}

/// The steps from the derivative to the equation of the tangent line.
fn justification(
    symbol: &str,
    point: &Expr,
    [at_point, value]: [&Expr; 2],
    [slope_at_point, slope]: [&Expr; 2],
    line: &Expr,
) -> Vec<Block> {
    let x0 = Math::raw(format!("{}_{{0}}", symbol), format!("{}0", symbol));
    let f = Math::raw(format!("f\\left({}\\right)", symbol), format!("f({})", symbol));
    let df = Math::raw(format!("f'\\left({}\\right)", symbol), format!("f'({})", symbol));

    vec![
        Block::Text(vec![
            Span::text("Evaluate at "),
            Span::Math(Math::raw(
                format!("{} = {}", x0.latex, point.to_latex()),
                format!("{} = {}", x0.plain, point),
            )),
        ]),
        Block::Text(vec![
            Span::text("Substituting the value of "),
            Span::Math(x0.clone()),
            Span::text(" into "),
            Span::Math(f),
            Span::text(": "),
            Span::Math(Math::raw(
                format!("f\\left({}\\right) = {} = {}", x0.latex, at_point.to_latex(), value.to_latex()),
                format!("f({}) = {} = {}", x0.plain, at_point, value),
            )),
        ]),
        Block::Text(vec![
            Span::text("Substituting the value of "),
            Span::Math(x0.clone()),
            Span::text(" into "),
            Span::Math(df),
            Span::text(": "),
            Span::Math(Math::raw(
                format!("f'\\left({}\\right) = {} = {}", x0.latex, slope_at_point.to_latex(), slope.to_latex()),
                format!("f'({}) = {} = {}", x0.plain, slope_at_point, slope),
            )),
        ]),
        Block::Text(vec![
            Span::text("Substituting into the line equation "),
            Span::Math(Math::raw(
                format!(
                    "y-f\\left({0}\\right)=f'\\left({0}\\right)\\left({1}-{0}\\right)",
                    x0.latex, symbol,
                ),
                format!("y-f({0})=f'({0})({1}-{0})", x0.plain, symbol),
            )),
            Span::text(": "),
            Span::Math(Math::raw(
                format!(
                    "y-({})=({})({}-({}))",
                    value.to_latex(), slope.to_latex(), symbol, point.to_latex(),
                ),
                format!("y-({})=({})({}-({}))", value, slope, symbol, point),
            )),
        ]),
        Block::Text(vec![
            Span::text("Simplifying: "),
            Span::Math(Math::raw(
                format!("y={}", line.to_latex()),
                format!("y={}", line),
            )),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use crate::options::ExplainOptionsBuilder;
    use super::*;

    fn html() -> ExplainOptions {
        ExplainOptionsBuilder::new().format(OutputFormat::Html).build()
    }

    #[test]
    fn cube() {
        let explanation = explain(&parse("x^3").unwrap(), "x", &ExplainOptions::default());
        assert_eq!(*explanation.answer(), parse("3x^2").unwrap());
        assert_eq!(
            explanation.text,
            "Apply the power rule: x^3 goes to 3*x^2\n\nThe answer is:\n3*x^2",
        );
    }

    #[test]
    fn reciprocal() {
        let explanation = explain(&parse("1/x").unwrap(), "x", &ExplainOptions::default());
        assert_eq!(*explanation.derivative(), simplify(&parse("-1/x^2").unwrap()));
        assert!(explanation.text.starts_with("Apply the quotient rule, which is:"));
    }

    #[test]
    fn html_header() {
        let explanation = explain(&parse("x^3").unwrap(), "x", &html());
        assert!(explanation.text.starts_with("Find: $$\\frac{d}{d x} x^{3}$$<br><br><ol>\n"));
        assert!(explanation.text.ends_with("<script type=\"math/tex; mode=display\">3 x^{2}</script>"));

        let options = html().into_builder().header(false).build();
        let explanation = explain(&parse("x^3").unwrap(), "x", &options);
        assert!(explanation.text.starts_with("<ol>\n"));
    }

    #[test]
    fn html_quotient_notation_is_normalized() {
        let explanation = explain(&parse("sin(x)/x").unwrap(), "x", &html());
        assert!(explanation.text.contains("\\frac{d}{d x}( \\frac{f{\\left(x \\right)}}{g{\\left(x \\right)}})"));
        assert!(!explanation.text.contains("\\frac{d}{d x} f{\\left(x \\right)}"));

        let options = html().into_builder().normalize_notation(false).build();
        let explanation = explain(&parse("sin(x)/x").unwrap(), "x", &options);
        assert!(explanation.text.contains("\\frac{d}{d x} f{\\left(x \\right)}"));
    }

    #[test]
    fn exponential_chain() {
        let explanation = explain(&parse("e^(x^2)").unwrap(), "x", &ExplainOptions::default());
        for x in [0.0, 0.5, 1.0] {
            let value = explanation.answer().eval_f64(&Ctxt::with_var("x", x)).unwrap();
            assert_float_absolute_eq!(value, 2.0 * x * (x * x).exp(), 1e-9);
        }
        assert!(explanation.text.contains("Let u = x^2."));
        assert!(explanation.text.contains("The derivative of e^u is itself."));
    }

    #[test]
    fn tangent_of_parabola() {
        let tangent = tangent_line(
            &parse("x^2").unwrap(),
            "x",
            &Expr::one(),
            &ExplainOptions::default(),
        ).unwrap();
        assert_eq!(tangent.value, Expr::one());
        assert_eq!(tangent.slope, Expr::integer(2));
        assert_eq!(tangent.intercept, Expr::integer(-1));
        assert_eq!(tangent.line("x"), parse("2x - 1").unwrap());
        assert_eq!(tangent.justification.lines().collect::<Vec<_>>(), [
            "Evaluate at x0 = 1",
            "Substituting the value of x0 into f(x): f(x0) = 1^2 = 1",
            "Substituting the value of x0 into f'(x): f'(x0) = 2 = 2",
            "Substituting into the line equation y-f(x0)=f'(x0)(x-x0): y-(1)=(2)(x-(1))",
            "Simplifying: y=2*x - 1",
        ]);
    }

    #[test]
    fn tangent_sign_cleanup() {
        let tangent = tangent_line(
            &parse("x^2").unwrap(),
            "x",
            &Expr::integer(-1),
            &ExplainOptions::default(),
        ).unwrap();
        assert_eq!(tangent.slope, Expr::integer(-2));
        assert_eq!(tangent.intercept, Expr::integer(-1));
        assert!(tangent.justification.contains("y-(1)=(-2)(x-(-1))"));
        assert!(!tangent.justification.contains("--"));
    }

    #[test]
    fn tangent_at_undefined_point() {
        let err = tangent_line(
            &parse("1/x").unwrap(),
            "x",
            &Expr::zero(),
            &ExplainOptions::default(),
        ).unwrap_err();
        assert!(err.spans.is_empty());

        let err = tangent_line(
            &parse("ln(x)").unwrap(),
            "x",
            &Expr::zero(),
            &ExplainOptions::default(),
        );
        assert!(err.is_err());

        // the function is defined at 0, but not its derivative
        let err = tangent_line(
            &parse("sqrt(x)").unwrap(),
            "x",
            &Expr::zero(),
            &ExplainOptions::default(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn undefined_values() {
        assert!(is_undefined(&parse("1/0").unwrap()));
        assert!(is_undefined(&parse("log(0)").unwrap()));
        assert!(!is_undefined(&parse("1/a").unwrap()));
        assert!(!is_undefined(&parse("f(0)").unwrap()));
        assert!(!is_undefined(&parse("sin(pi)").unwrap()));
    }

    #[test]
    fn higher_derivatives() {
        let explanations = explain_higher(&parse("x^4").unwrap(), "x", 3, &ExplainOptions::default());
        let answers = explanations.iter().map(|e| e.answer().clone()).collect::<Vec<_>>();
        assert_eq!(answers, [
            parse("4x^3").unwrap(),
            parse("12x^2").unwrap(),
            parse("24x").unwrap(),
        ]);
        assert!(!explanations[0].text.starts_with("Next derivative"));
        assert!(explanations[1].text.starts_with("Next derivative\n\n"));
        assert!(explain_higher(&parse("x").unwrap(), "x", 0, &ExplainOptions::default()).is_empty());
    }

    #[test]
    fn higher_derivatives_in_html() {
        let explanations = explain_higher(&parse("sin(x)").unwrap(), "x", 2, &html());
        assert!(explanations[1].text.starts_with("<br/>Next derivative<br/>Find: $$\\frac{d}{d x} \\cos{\\left(x \\right)}$$"));
        assert_eq!(*explanations[1].answer(), parse("-sin(x)").unwrap());
    }
}
