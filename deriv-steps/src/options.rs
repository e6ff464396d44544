use crate::{
    finalize::SimplifyCascade,
    render::{Format, HtmlFormat, PlainFormat},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The text format of an explanation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    /// Plain text, indented with tabs.
    ///
    /// This is the default option.
    #[default]
    Plain,

    /// HTML with nested ordered lists and MathJax scripts.
    Html,
}

impl OutputFormat {
    /// Returns the writer for this format.
    pub fn writer(self) -> &'static dyn Format {
        match self {
            Self::Plain => &PlainFormat,
            Self::Html => &HtmlFormat,
        }
    }
}

/// Options for [`explain`](crate::explain()) and the other entry points.
#[derive(Debug, Clone)]
pub struct ExplainOptions {
    /// The text format of the explanation.
    pub format: OutputFormat,

    /// The cascade used to simplify the answer.
    pub cascade: SimplifyCascade,

    /// Whether to parenthesize the ambiguous derivative notation of the product and quotient rule
    /// formulas. Only applies to [`OutputFormat::Html`].
    pub normalize_notation: bool,

    /// Whether to begin the text with the derivative to find. Only applies to
    /// [`OutputFormat::Html`].
    pub header: bool,
}

impl Default for ExplainOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            cascade: SimplifyCascade::default(),
            normalize_notation: true,
            header: true,
        }
    }
}

impl ExplainOptions {
    /// Converts the options into a builder, to change some of the options.
    pub fn into_builder(self) -> ExplainOptionsBuilder {
        ExplainOptionsBuilder(self)
    }
}

/// Helper struct to build an [`ExplainOptions`] struct.
#[derive(Debug, Default, Clone)]
pub struct ExplainOptionsBuilder(ExplainOptions);

impl ExplainOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.0.format = format;
        self
    }

    /// Sets the simplification cascade. See [`SimplifyCascade`] for more information.
    pub fn cascade(mut self, cascade: SimplifyCascade) -> Self {
        self.0.cascade = cascade;
        self
    }

    /// Sets whether to normalize the derivative notation.
    pub fn normalize_notation(mut self, normalize_notation: bool) -> Self {
        self.0.normalize_notation = normalize_notation;
        self
    }

    /// Sets whether to write the header.
    pub fn header(mut self, header: bool) -> Self {
        self.0.header = header;
        self
    }

    /// Builds the [`ExplainOptions`] struct.
    pub fn build(self) -> ExplainOptions {
        self.0
    }
}
