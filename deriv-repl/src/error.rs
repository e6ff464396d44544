use ariadne::Source;
use deriv_error::{impl_error_kind, Error as ReportError};
use std::ops::Range;

/// The command is not one of the REPL commands.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownCommand {
    /// The name of the command.
    pub name: String,
}

impl_error_kind!(UnknownCommand, |this| {
    message = format!("unknown command `:{}`", this.name),
    labels = ["this command"],
    help = "the commands are `:var`, `:format`, `:tangent` and `:higher`",
});

/// The command was given the wrong arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidArguments {
    /// How to use the command.
    pub usage: &'static str,
}

impl_error_kind!(InvalidArguments, |this| {
    message = "invalid arguments",
    labels = ["here"],
    help = format!("usage: {}", this.usage),
});

/// Utility enum to package errors that can occur while running a line of input.
#[derive(Debug)]
pub enum Error {
    /// An error that occurred while parsing an expression.
    ParseError(ReportError),

    /// The tangent line does not exist at the requested point.
    TangentError(ReportError),

    /// The command is malformed.
    CommandError(ReportError),
}

impl Error {
    /// Creates a command error highlighting the given region of the input.
    pub fn command(span: Range<usize>, kind: impl deriv_error::ErrorKind + 'static) -> Self {
        Self::CommandError(ReportError::new(vec![span], kind))
    }

    /// Report the error in this [`Error`] to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        let (Self::ParseError(err) | Self::TangentError(err) | Self::CommandError(err)) = self;
        let report = err.build_report("input");
        if let Err(io_err) = report.eprint(("input", Source::from(input))) {
            tracing::warn!(%io_err, "could not print the error report");
        }
    }
}
