use super::{Block, Document, Format, Span};

/// Plain text, indented with tabs, with a blank line after each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainFormat;

/// Accumulates the lines of the output.
#[derive(Default)]
struct Writer {
    lines: Vec<String>,
}

impl Writer {
    fn line(&mut self, level: usize, content: &str) {
        self.lines.push(format!("{}{}", "\t".repeat(level), content));
    }

    fn blocks(&mut self, level: usize, blocks: &[Block]) {
        for block in blocks {
            self.block(level, block);
        }
    }

    fn block(&mut self, level: usize, block: &Block) {
        match block {
            Block::Text(spans) => {
                let text = spans.iter()
                    .map(|span| match span {
                        Span::Text(text) => text.as_str(),
                        Span::Math(math) => math.plain.as_str(),
                    })
                    .collect::<String>();
                self.line(level, &text);
            },
            Block::Math(math) => self.line(level, &math.plain),
            Block::Header(header) => self.line(level, header),
            Block::Step(children) => {
                self.blocks(level, children);
                self.lines.push(String::new());
            },
            Block::Level(children) => self.blocks(level + 1, children),
            Block::Collapsible(children) => self.blocks(level, children),
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

impl Format for PlainFormat {
    fn write_blocks(&self, blocks: &[Block]) -> String {
        let mut writer = Writer::default();
        writer.blocks(0, blocks);
        writer.finish()
    }

    fn write_document(&self, document: &Document) -> String {
        let mut writer = Writer::default();
        writer.blocks(0, &document.steps);
        writer.blocks(0, &document.conclusion);
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
        assert_eq!(
            PlainFormat.write_document(&document),
            "Apply the power rule: x^3 goes to 3*x^2\n\nThe answer is:\n3*x^2",
        );
    }

    #[test]
    fn nested_levels_use_tabs() {
        let blocks = vec![Block::Step(vec![
            Block::text("outer"),
            Block::Level(vec![Block::Step(vec![Block::text("inner")])]),
        ])];
        assert_eq!(PlainFormat.write_blocks(&blocks), "outer\n\tinner\n\n");
    }
}
