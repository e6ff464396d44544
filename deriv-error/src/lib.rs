//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Error kinds are declared with the [`impl_error_kind!`] macro, which accepts a `message`, a list
//! of `labels` (one per span, in order), and an optional `help` note:
//!
//! ```
//! use deriv_error::{impl_error_kind, Error};
//!
//! #[derive(Debug)]
//! struct NotANumber {
//!     found: char,
//! }
//!
//! impl_error_kind!(NotANumber, |this| {
//!     message = format!("`{}` is not a number", this.found),
//!     labels = ["here"],
//!     help = "numbers are made of the digits 0 to 9",
//! });
//!
//! let err = Error::new(vec![0..1], NotANumber { found: 'q' });
//! let _report = err.build_report("input");
//! ```

pub use ariadne;

use ariadne::{Color, Report};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

/// Implements [`ErrorKind`] for a type.
///
/// The closure-like binding (`|this|`) names the error value inside the `message`, `labels` and
/// `help` expressions. Labels are attached to the error's spans in order; surplus labels are
/// ignored, and an empty label highlights its span without a message.
#[macro_export]
macro_rules! impl_error_kind {
    (
        $ty:ty, |$this:ident| {
            message = $message:expr,
            labels = [$($label:expr),* $(,)?]
            $(, help = $help:expr)?
            $(,)?
        }
    ) => {
        impl $crate::ErrorKind for $ty {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[::std::ops::Range<usize>],
            ) -> $crate::ariadne::Report<(&'a str, ::std::ops::Range<usize>)> {
                #[allow(unused_variables)]
                let $this = self;
                let labels: ::std::vec::Vec<::std::string::String> =
                    ::std::vec![$(::std::string::ToString::to_string(&$label)),*];
                let start = spans.first().map_or(0, |span| span.start);

                #[allow(unused_mut)]
                let mut builder = $crate::ariadne::Report::build($crate::ariadne::ReportKind::Error, src_id, start)
                    .with_message($message)
                    .with_labels(
                        labels
                            .into_iter()
                            .zip(spans.iter())
                            .map(|(label_str, span)| {
                                let mut label = $crate::ariadne::Label::new((src_id, span.clone()))
                                    .with_color($crate::EXPR);

                                if !label_str.is_empty() {
                                    label = label.with_message(label_str);
                                }

                                label
                            })
                            .collect::<::std::vec::Vec<_>>()
                    );

                $(builder.set_help($help);)?
                builder.finish()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use super::*;

    #[derive(Debug)]
    struct Unbalanced {
        opening: bool,
    }

    impl_error_kind!(Unbalanced, |this| {
        message = "unbalanced parenthesis",
        labels = ["this one", ""],
        help = if this.opening { "close it" } else { "open it" },
    });

    #[derive(Debug)]
    struct Bare;

    impl_error_kind!(Bare, |this| {
        message = "something went wrong",
        labels = [],
    });

    /// Renders the report for the given error to a string without color codes.
    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(input)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let err = Error::new(vec![3..4, 7..8], Unbalanced { opening: true });
        let out = render(&err, "x*(y + (z)");
        assert!(out.contains("unbalanced parenthesis"));
        assert!(out.contains("this one"));
        assert!(out.contains("close it"));
    }

    #[test]
    fn report_without_labels() {
        let err = Error::new(vec![0..1], Bare);
        let out = render(&err, "x");
        assert!(out.contains("something went wrong"));
    }
}
