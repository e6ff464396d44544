//! Rendering of a derivation tree into a step-by-step explanation.
//!
//! The tree is walked top-down. Every node becomes a [`Block::Step`], and the substeps of a node
//! are placed in a nested [`Block::Level`]. Whenever a step needs to show a derivative, the
//! subtree is [evaluated](crate::eval::evaluate) on the spot.
//!
//! The result is a format-neutral [`Document`]; [`PlainFormat`] and [`HtmlFormat`] turn it into
//! text.
//!
//! # Alternative methods
//!
//! Some functions, like `tan`, can be differentiated in several ways. The first time such a
//! function appears in a document, its alternative methods are explained. Later occurrences of
//! the same function only show the canonical method. When there is exactly one alternative, it
//! is shown directly, without a collapsible section.

mod document;
mod html;
mod plain;

use deriv_algebra::{expr::make_fraction, Expr};
use std::collections::HashSet;
use crate::{eval::evaluate, finalize::SimplifyCascade, tree::{Derivation, Rule}};

pub use document::{Block, Document, Math, Span};
pub use html::HtmlFormat;
pub use plain::PlainFormat;

/// Symbols shown in place of the fresh variable of the chain rule, in order of preference.
const CHAIN_VARIABLES: [&str; 6] = ["u", "v", "w", "z", "t", "s"];

/// Picks the name shown for the chain rule substitution of `tree`: the first of
/// [`CHAIN_VARIABLES`] that does not already appear in the expression. Falls back to the fresh
/// variable itself.
fn chain_variable<'a>(tree: &Derivation, fresh: &'a str) -> &'a str {
    CHAIN_VARIABLES.into_iter()
        .find(|name| *name != tree.symbol && !tree.context.contains_symbol(name))
        .unwrap_or(fresh)
}

/// A text format for [`Document`]s.
pub trait Format {
    /// Writes a sequence of blocks, at the outermost level.
    fn write_blocks(&self, blocks: &[Block]) -> String;

    /// Writes a complete document.
    fn write_document(&self, document: &Document) -> String;
}

/// Renders the explanation of the tree, finishing with the default simplification cascade.
pub fn render(tree: &Derivation) -> Document {
    render_with(tree, &SimplifyCascade::default())
}

/// Renders the explanation of the tree, finishing with the given simplification cascade.
pub fn render_with(tree: &Derivation, cascade: &SimplifyCascade) -> Document {
    let mut steps = Vec::new();
    Renderer::default().rule(tree, &mut steps);

    let derivative = evaluate(tree);
    let answer = match cascade.apply(&derivative) {
        Some(simplified) => {
            steps.push(Block::Step(vec![
                Block::text("Simplifying:"),
                Block::expr(&simplified),
            ]));
            simplified
        },
        None => derivative.clone(),
    };

    Document {
        steps,
        conclusion: vec![Block::text("The answer is:"), Block::expr(&answer)],
        derivative,
        answer,
    }
}

/// Returns the names of the functions in the product rule formula for `n` factors.
fn function_names(n: usize) -> Vec<String> {
    match n {
        2 => vec!["f".to_owned(), "g".to_owned()],
        3 => vec!["f".to_owned(), "g".to_owned(), "h".to_owned()],
        _ => (1..=n).map(|i| format!("f_{}", i)).collect(),
    }
}

/// `d/dx expr`
fn d(expr: &Expr, symbol: &str) -> Expr {
    Expr::derivative_of(expr.clone(), symbol)
}

/// Walks a derivation tree. Lives for a single render.
#[derive(Debug, Default)]
struct Renderer {
    /// Functions whose alternative methods were already explained.
    expanded: HashSet<String>,
}

impl Renderer {
    /// Renders the node and its substeps, appending the blocks to `out`.
    fn rule(&mut self, tree: &Derivation, out: &mut Vec<Block>) {
        let Derivation { context, symbol, rule } = tree;

        match rule {
            Rule::Constant => out.push(Block::Step(vec![Block::Text(vec![
                Span::text("The derivative of the constant "),
                Span::expr(context),
                Span::text(" is zero."),
            ])])),
            Rule::ConstantTimes { substep, .. } => out.push(Block::Step(vec![
                Block::text("The derivative of a constant times a function is the constant times the derivative of the function."),
                self.level([&**substep]),
                Block::Text(vec![Span::text("So, the result is: "), Span::expr(&evaluate(tree))]),
            ])),
            Rule::Power { .. } => out.push(Block::Step(vec![Block::Text(vec![
                Span::text("Apply the power rule: "),
                Span::expr(context),
                Span::text(" goes to "),
                Span::expr(&evaluate(tree)),
            ])])),
            Rule::Exponential { base, .. } => {
                let text = if base.as_symbol() == Some("e") {
                    vec![
                        Span::text("The derivative of "),
                        Span::expr(&Expr::pow(base.clone(), Expr::symbol(symbol.clone()))),
                        Span::text(" is itself."),
                    ]
                } else {
                    vec![Span::eq(&d(context, symbol), &evaluate(tree))]
                };
                out.push(Block::Step(vec![Block::Text(text)]));
            },
            Rule::Logarithm { argument, base } => {
                let derivative = evaluate(tree);
                let blocks = match base {
                    None => vec![Block::Text(vec![
                        Span::text("The derivative of "),
                        Span::expr(context),
                        Span::text(" is "),
                        Span::expr(&derivative),
                        Span::text("."),
                    ])],
                    Some(base) => {
                        let variable = Expr::symbol(symbol.clone());
                        let log_base = Expr::call("log", vec![base.clone()]);
                        vec![
                            Block::Text(vec![
                                Span::text("The derivative of "),
                                Span::expr(&Expr::call("log", vec![variable, base.clone()])),
                                Span::text(" is "),
                                Span::expr(&Expr::recip(argument.clone() * log_base)),
                                Span::text("."),
                            ]),
                            Block::Text(vec![
                                Span::text("So "),
                                Span::eq(&d(context, symbol), &derivative),
                            ]),
                        ]
                    },
                };
                out.push(Block::Step(blocks));
            },
            Rule::Sum { substeps } => out.push(Block::Step(vec![
                Block::Text(vec![
                    Span::text("Differentiate "),
                    Span::expr(context),
                    Span::text(" term by term:"),
                ]),
                self.level(substeps),
                Block::Text(vec![Span::text("The result is: "), Span::expr(&evaluate(tree))]),
            ])),
            Rule::Product { terms, substeps } => self.product(tree, terms, substeps, out),
            Rule::Quotient { numerator, denominator, numerator_step, denominator_step } => {
                self.quotient(tree, numerator, denominator, numerator_step, denominator_step, out)
            },
            Rule::Chain { outer, inner, variable, inner_step } => {
                self.chain(tree, outer, inner, variable, inner_step, out)
            },
            Rule::Trig { function } => {
                let message = match function.as_call().map(|(name, _)| name) {
                    Some("sin") => "The derivative of sine is cosine:",
                    Some("cos") => "The derivative of cosine is negative sine:",
                    Some("tan") => "The derivative of tangent is secant squared:",
                    Some("sec") => "The derivative of secant is secant times tangent:",
                    Some("csc") => "The derivative of cosecant is negative cosecant times cotangent:",
                    Some("cot") => "The derivative of cotangent is negative cosecant squared:",
                    _ => "The derivative is:",
                };
                out.push(Block::Step(vec![
                    Block::text(message),
                    Block::eq(&d(function, symbol), &evaluate(tree)),
                ]));
            },
            Rule::Rewrite { rewritten, substep } => {
                let mut blocks = vec![
                    Block::text("Rewrite the function to be differentiated:"),
                    Block::eq(context, rewritten),
                ];
                self.rule(substep, &mut blocks);
                out.push(Block::Step(blocks));
            },
            Rule::Alternative { candidates } => self.alternative(context, candidates, out),
            Rule::Function => out.push(Block::Step(vec![
                Block::text("Trivial:"),
                Block::eq(&d(context, symbol), &evaluate(tree)),
            ])),
            Rule::Unknown => out.push(Block::Step(vec![
                Block::text("Don't know the steps in finding this derivative."),
                Block::text("But the derivative is"),
                Block::expr(&evaluate(tree)),
            ])),
        }
    }

    /// Renders the derivations one level deeper.
    fn level<'a>(&mut self, trees: impl IntoIterator<Item = &'a Derivation>) -> Block {
        let mut blocks = Vec::new();
        for tree in trees {
            self.rule(tree, &mut blocks);
        }
        Block::Level(blocks)
    }

    fn product(&mut self, tree: &Derivation, terms: &[Expr], substeps: &[Derivation], out: &mut Vec<Block>) {
        let symbol = &tree.symbol;
        let functions = function_names(terms.len())
            .into_iter()
            .map(|name| Expr::call(name, vec![Expr::symbol(symbol.clone())]))
            .collect::<Vec<_>>();

        // d/dx (f g h) = g h f' + f h g' + f g h'
        // the derivative factor is written last, see `normalize_notation`
        let expanded = (0..functions.len())
            .map(|i| {
                let mut factors = functions.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, function)| function.clone())
                    .collect::<Vec<_>>();
                factors.push(d(&functions[i], symbol));
                Expr::Mul(factors)
            })
            .collect();

        let mut blocks = vec![
            Block::text("Apply the product rule:"),
            Block::eq(&d(&Expr::Mul(functions.clone()), symbol), &Expr::Add(expanded)),
        ];
        for ((function, term), substep) in functions.iter().zip(terms).zip(substeps) {
            blocks.push(Block::Text(vec![
                Span::eq(function, term),
                Span::text("; to find "),
                Span::expr(&d(function, symbol)),
                Span::text(":"),
            ]));
            blocks.push(self.level([substep]));
        }
        blocks.push(Block::Text(vec![Span::text("The result is: "), Span::expr(&evaluate(tree))]));

        out.push(Block::Step(blocks));
    }

    fn quotient(
        &mut self,
        tree: &Derivation,
        numerator: &Expr,
        denominator: &Expr,
        numerator_step: &Derivation,
        denominator_step: &Derivation,
        out: &mut Vec<Block>,
    ) {
        let symbol = &tree.symbol;
        let variable = Expr::symbol(symbol.clone());
        let f = Expr::call("f", vec![variable.clone()]);
        let g = Expr::call("g", vec![variable]);

        // (-f g' + g f') / g^2
        let rule = make_fraction(
            Expr::Add(vec![
                Expr::Mul(vec![Expr::integer(-1), f.clone(), d(&g, symbol)]),
                Expr::Mul(vec![g.clone(), d(&f, symbol)]),
            ]),
            Expr::pow(g.clone(), Expr::integer(2)),
        );

        out.push(Block::Step(vec![
            Block::text("Apply the quotient rule, which is:"),
            Block::eq(&d(&make_fraction(f.clone(), g.clone()), symbol), &rule),
            Block::Text(vec![
                Span::eq(&f, numerator),
                Span::text(" and "),
                Span::eq(&g, denominator),
                Span::text("."),
            ]),
            Block::Text(vec![Span::text("To find "), Span::expr(&d(&f, symbol)), Span::text(":")]),
            self.level([numerator_step]),
            Block::Text(vec![Span::text("To find "), Span::expr(&d(&g, symbol)), Span::text(":")]),
            self.level([denominator_step]),
            Block::text("Now plug in to the quotient rule:"),
            Block::Text(vec![Span::expr(&evaluate(tree))]),
        ]));
    }

    fn chain(
        &mut self,
        tree: &Derivation,
        outer: &Derivation,
        inner: &Expr,
        variable: &str,
        inner_step: &Derivation,
        out: &mut Vec<Block>,
    ) {
        let name = chain_variable(tree, variable);
        let u = Expr::symbol(name);
        let mut substitution = vec![Block::Text(vec![
            Span::text("Let "),
            Span::eq(&u, inner),
            Span::text("."),
        ])];
        self.rule(&outer.replace_symbol(variable, name), &mut substitution);
        out.push(Block::Step(substitution));

        let mut blocks = vec![Block::Text(vec![
            Span::text("Then, apply the chain rule. Multiply by "),
            Span::expr(&d(inner, &tree.symbol)),
            Span::text(":"),
        ])];
        if inner_step.rule != Rule::Function {
            blocks.push(self.level([inner_step]));
            blocks.push(Block::text("The result of the chain rule is:"));
        }
        blocks.push(Block::expr(&evaluate(tree)));
        out.push(Block::Step(blocks));
    }

    fn alternative(&mut self, context: &Expr, candidates: &[Derivation], out: &mut Vec<Block>) {
        let key = match context.as_call() {
            Some((name, _)) => name.to_owned(),
            None => context.to_string(),
        };

        if self.expanded.contains(&key) {
            if let Some(canonical) = candidates.first() {
                self.rule(canonical, out);
            }
            return;
        }

        self.expanded.insert(key);
        match candidates {
            [] => (),
            [canonical] => self.rule(canonical, out),
            [_, alternative] => self.rule(alternative, out),
            [_, alternatives @ ..] => {
                let mut blocks = vec![Block::text("There are multiple ways to do this derivative.")];
                for (i, alternative) in alternatives.iter().enumerate() {
                    blocks.push(Block::Collapsible(vec![
                        Block::Header(format!("Method #{}", i + 1)),
                        self.level([alternative]),
                    ]));
                }
                out.push(Block::Step(blocks));
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use crate::build::build;
    use super::*;

    fn render_x(input: &str) -> Document {
        render(&build(&parse(input).unwrap(), "x"))
    }

    /// Returns true if the block is a paragraph that starts with the given prose.
    fn starts_with(block: &Block, prefix: &str) -> bool {
        match block {
            Block::Text(spans) => matches!(spans.first(), Some(Span::Text(text)) if text.starts_with(prefix)),
            _ => false,
        }
    }

    #[test]
    fn power_rule_step() {
        let document = render_x("x^3");
        assert_eq!(document.steps, vec![Block::Step(vec![Block::Text(vec![
            Span::text("Apply the power rule: "),
            Span::expr(&parse("x^3").unwrap()),
            Span::text(" goes to "),
            Span::expr(&parse("3x^2").unwrap()),
        ])])]);
        assert_eq!(document.answer, parse("3x^2").unwrap());
    }

    #[test]
    fn rendering_is_idempotent() {
        let tree = build(&parse("tan(x) sin(x^2) + ln(3x) + cot(x)").unwrap(), "x");
        assert_eq!(render(&tree), render(&tree));
    }

    #[test]
    fn alternatives_expanded_once() {
        let document = render_x("tan(x) + tan(2x)");
        let rewrites = document.count(|block| starts_with(block, "Rewrite the function"));
        assert_eq!(rewrites, 1);
    }

    #[test]
    fn many_alternatives_are_collapsible() {
        let document = render_x("cot(x) + cot(3x)");
        assert_eq!(document.count(|block| starts_with(block, "There are multiple ways")), 1);
        assert_eq!(document.count(|block| matches!(block, Block::Collapsible(_))), 2);
        assert_eq!(document.count(|block| *block == Block::Header("Method #2".to_owned())), 1);
    }

    #[test]
    fn product_rule_names() {
        assert_eq!(function_names(2), ["f", "g"]);
        assert_eq!(function_names(3), ["f", "g", "h"]);
        assert_eq!(function_names(5), ["f_1", "f_2", "f_3", "f_4", "f_5"]);
    }

    #[test]
    fn chain_rule_uses_u() {
        let document = render_x("sin(x^2)");
        let Block::Step(first) = &document.steps[0] else {
            panic!("expected a step");
        };
        assert_eq!(first[0], Block::Text(vec![
            Span::text("Let "),
            Span::eq(&Expr::symbol("u"), &parse("x^2").unwrap()),
            Span::text("."),
        ]));
        assert_eq!(first[1], Block::Step(vec![
            Block::text("The derivative of sine is cosine:"),
            Block::eq(
                &Expr::derivative_of(parse("sin(u)").unwrap(), "u"),
                &parse("cos(u)").unwrap(),
            ),
        ]));
    }

    #[test]
    fn chain_variable_avoids_existing_symbols() {
        let document = render_x("sin(u x)");
        let Block::Step(first) = &document.steps[0] else {
            panic!("expected a step");
        };
        assert_eq!(first[0], Block::Text(vec![
            Span::text("Let "),
            Span::eq(&Expr::symbol("v"), &parse("u x").unwrap()),
            Span::text("."),
        ]));
        assert_eq!(first[1], Block::Step(vec![
            Block::text("The derivative of sine is cosine:"),
            Block::eq(
                &Expr::derivative_of(parse("sin(v)").unwrap(), "v"),
                &parse("cos(v)").unwrap(),
            ),
        ]));

        let tree = build(&parse("cos(u v w z s + t)").unwrap(), "t");
        assert_eq!(chain_variable(&tree, "fresh"), "fresh");
    }

    #[test]
    fn unknown_still_has_answer() {
        let document = render_x("x^x");
        assert_eq!(document.count(|block| starts_with(block, "Don't know the steps")), 1);
        assert_eq!(document.derivative, deriv_algebra::simplify(&deriv_algebra::derivative(&parse("x^x").unwrap(), "x")));
    }

    #[test]
    fn simplification_step() {
        // the product rule result is simplified with trigonometric identities
        let document = render_x("sin(x) cos(x)");
        assert_eq!(document.answer, parse("cos(2x)").unwrap());
        assert!(matches!(
            document.steps.last(),
            Some(Block::Step(blocks)) if blocks[0] == Block::text("Simplifying:")
        ));

        // nothing to simplify
        let document = render_x("x^3");
        assert_eq!(document.steps.len(), 1);
    }
}
