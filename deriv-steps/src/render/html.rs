use super::{Block, Document, Format, Math, Span};

/// HTML with nested ordered lists, for pages that typeset mathematics with MathJax.
///
/// Mathematics is written in `<script type="math/tex">` tags, and alternative methods are placed
/// in `<div class="collapsible">` sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlFormat;

fn inline(math: &Math) -> String {
    format!(r#"<script type="math/tex; mode=inline">{}</script>"#, math.latex)
}

fn display(math: &Math) -> String {
    format!(r#"<script type="math/tex; mode=display">{}</script>"#, math.latex)
}

fn indent(level: usize) -> String {
    "    ".repeat(level)
}

#[derive(Default)]
struct Writer {
    lines: Vec<String>,
    level: usize,
}

impl Writer {
    /// Writes a line inside the current list item.
    fn content(&mut self, content: String) {
        self.lines.push(format!("{}{}", indent(self.level + 1), content));
    }

    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Text(spans) => {
                let text = spans.iter()
                    .map(|span| match span {
                        Span::Text(text) => text.clone(),
                        Span::Math(math) => inline(math),
                    })
                    .collect::<String>();
                self.content(format!("<p>{}</p>", text));
            },
            Block::Math(math) => self.content(display(math)),
            Block::Header(header) => self.content(format!("<h2>{}</h2>", header)),
            Block::Step(children) => {
                self.lines.push(format!("{}<li>", indent(self.level)));
                self.blocks(children);
                self.lines.push(format!("{}</li><br>", indent(self.level)));
            },
            Block::Level(children) => {
                self.level += 1;
                self.lines.push(format!("{}<ol>", indent(self.level)));
                self.blocks(children);
                self.lines.push(format!("{}</ol><br/>", indent(self.level)));
                self.level -= 1;
            },
            Block::Collapsible(children) => {
                self.lines.push(format!(r#"{}<div class="collapsible">"#, indent(self.level)));
                self.blocks(children);
                self.lines.push(format!("{}</div>", indent(self.level)));
            },
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

impl Format for HtmlFormat {
    fn write_blocks(&self, blocks: &[Block]) -> String {
        let mut writer = Writer::default();
        writer.blocks(blocks);
        writer.finish()
    }

    fn write_document(&self, document: &Document) -> String {
        let mut writer = Writer::default();
        writer.lines.push("<ol>".to_owned());
        writer.blocks(&document.steps);
        writer.lines.push("</ol><br/>".to_owned());
        writer.lines.push("<hr/>".to_owned());
        writer.blocks(&document.conclusion);
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use deriv_algebra::parse;
    use pretty_assertions::assert_eq;
    use crate::{build::build, render::render};
    use super::*;

    #[test]
    fn power_rule() {
        let document = render(&build(&parse("x^3").unwrap(), "x"));
        assert_eq!(HtmlFormat.write_document(&document), [
            "<ol>",
            "<li>",
            r#"    <p>Apply the power rule: <script type="math/tex; mode=inline">x^{3}</script> goes to <script type="math/tex; mode=inline">3 x^{2}</script></p>"#,
            "</li><br>",
            "</ol><br/>",
            "<hr/>",
            "    <p>The answer is:</p>",
            r#"    <script type="math/tex; mode=display">3 x^{2}</script>"#,
        ].join("\n"));
    }

    #[test]
    fn nested_levels_and_collapsibles() {
        let blocks = vec![Block::Step(vec![
            Block::text("outer"),
            Block::Collapsible(vec![
                Block::Header("Method #1".to_owned()),
                Block::Level(vec![Block::Step(vec![Block::text("inner")])]),
            ]),
        ])];
        assert_eq!(HtmlFormat.write_blocks(&blocks), [
            "<li>",
            "    <p>outer</p>",
            r#"<div class="collapsible">"#,
            "    <h2>Method #1</h2>",
            "    <ol>",
            "    <li>",
            "        <p>inner</p>",
            "    </li><br>",
            "    </ol><br/>",
            "</div>",
            "</li><br>",
        ].join("\n"));
    }

    #[test]
    fn alternatives_are_collapsible() {
        let document = render(&build(&parse("cot(x)").unwrap(), "x"));
        let html = HtmlFormat.write_document(&document);
        assert_eq!(html.matches(r#"<div class="collapsible">"#).count(), 2);
        assert!(html.contains("<h2>Method #2</h2>"));
        assert_eq!(html.matches("<ol>").count(), html.matches("</ol><br/>").count());
        assert_eq!(html.matches("<li>").count(), html.matches("</li><br>").count());
    }
}
