mod error;

use deriv_algebra::{parse, Expr};
use deriv_steps::{explain, explain_higher, tangent_line, ExplainOptions, OutputFormat};
use error::{Error, InvalidArguments, UnknownCommand};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}, ops::Range, process::ExitCode};
use tracing_subscriber::EnvFilter;

const TANGENT_USAGE: &str = ":tangent <expression> @ <point>";
const HIGHER_USAGE: &str = ":higher <order> <expression>";
const VAR_USAGE: &str = ":var <name>";
const FORMAT_USAGE: &str = ":format plain|html";

/// The settings of the session, changed by the command line and the `:var` and `:format`
/// commands.
#[derive(Debug)]
struct Session {
    /// The variable of differentiation.
    symbol: String,

    /// Options passed to the explainer.
    options: ExplainOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            symbol: "x".to_owned(),
            options: ExplainOptions::default(),
        }
    }
}

/// Returns the range of `part` within `input`. `part` must be a subslice of `input`.
fn range_of(input: &str, part: &str) -> Range<usize> {
    let start = part.as_ptr() as usize - input.as_ptr() as usize;
    start..start + part.len()
}

/// Parses a part of the input, reporting errors relative to the whole input.
fn parse_part(input: &str, part: &str) -> Result<Expr, Error> {
    let offset = range_of(input, part).start;
    parse(part).map_err(|mut err| {
        for span in &mut err.spans {
            *span = span.start + offset..span.end + offset;
        }
        Error::ParseError(err)
    })
}

/// Runs a command, such as `:var t`. `line` is the whole input line, and `command` is the line
/// without the leading colon.
fn run_command(line: &str, command: &str, session: &mut Session) -> Result<(), Error> {
    let command = command.trim();
    let (name, args) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
    let args = args.trim();
    let invalid = |usage| Error::command(range_of(line, command), InvalidArguments { usage });

    match name {
        "var" => {
            if args.is_empty() || !args.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(invalid(VAR_USAGE));
            }
            session.symbol = args.to_owned();
        },
        "format" => {
            session.options.format = match args {
                "plain" => OutputFormat::Plain,
                "html" => OutputFormat::Html,
                _ => return Err(invalid(FORMAT_USAGE)),
            };
        },
        "tangent" => {
            let Some((expr, point)) = args.split_once('@') else {
                return Err(invalid(TANGENT_USAGE));
            };
            let expr = parse_part(line, expr.trim())?;
            let point_src = point.trim();
            let point = parse_part(line, point_src)?;

            let tangent = tangent_line(&expr, &session.symbol, &point, &session.options)
                .map_err(|mut err| {
                    err.spans = vec![range_of(line, point_src)];
                    Error::TangentError(err)
                })?;
            println!("{}", tangent.explanation.text);
            println!();
            println!("{}", tangent.justification);
        },
        "higher" => {
            let (order, expr) = args.split_once(char::is_whitespace).ok_or_else(|| invalid(HIGHER_USAGE))?;
            let order = order.parse::<usize>().map_err(|_| invalid(HIGHER_USAGE))?;
            let expr = parse_part(line, expr.trim())?;

            for explanation in explain_higher(&expr, &session.symbol, order, &session.options) {
                println!("{}", explanation.text);
                println!();
            }
        },
        _ => return Err(Error::command(range_of(line, name), UnknownCommand { name: name.to_owned() })),
    }

    Ok(())
}

/// Runs a single line of input: a command, or an expression to differentiate.
fn run_line(line: &str, session: &mut Session) -> Result<(), Error> {
    if let Some(command) = line.trim_start().strip_prefix(':') {
        return run_command(line, command, session);
    }

    let expr = parse_part(line, line.trim())?;
    println!("{}", explain(&expr, &session.symbol, &session.options).text);
    Ok(())
}

/// Runs every non-empty line of the input, printing the explanations or the errors.
fn run_source(input: &str, session: &mut Session) {
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        if let Err(err) = run_line(line, session) {
            err.report_to_stderr(line);
        }
    }
}

/// Reads the command line, returning the session settings and the file to run, if any.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Session, Option<String>), String> {
    let mut session = Session::default();
    let mut filename = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--html" => session.options.format = OutputFormat::Html,
            "--var" => session.symbol = args.next().ok_or("`--var` needs a variable name")?,
            _ if arg.starts_with("--") => return Err(format!("unknown option `{}`", arg)),
            _ => filename = Some(arg),
        }
    }

    Ok((session, filename))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let (mut session, filename) = match parse_args(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: deriv-repl [--html] [--var <name>] [file]");
            return ExitCode::FAILURE;
        },
    };

    if let Some(filename) = filename {
        // run source file
        let mut input = String::new();
        let read = File::open(&filename)
            .and_then(|file| BufReader::new(file).read_to_string(&mut input));
        if let Err(err) = read {
            eprintln!("could not read `{}`: {}", filename, err);
            return ExitCode::FAILURE;
        }

        run_source(&input, &mut session);
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }

        run_source(&input, &mut session);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            if let Err(err) = run_line(&input, session) {
                err.report_to_stderr(&input);
            }
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn commands_change_session() {
        let mut session = Session::default();
        run_line(":var t", &mut session).unwrap();
        run_line(":format html", &mut session).unwrap();
        assert_eq!(session.symbol, "t");
        assert_eq!(session.options.format, OutputFormat::Html);
    }

    #[test]
    fn parse_errors_point_into_the_line() {
        let line = ":tangent x^2 @ 1 +";
        let Err(Error::ParseError(err)) = run_line(line, &mut Session::default()) else {
            panic!("expected a parse error");
        };
        assert!(err.spans.iter().all(|span| span.start >= line.find('@').unwrap()));
    }

    #[test]
    fn tangent_error_highlights_point() {
        let line = ":tangent 1/x @ 0";
        let Err(Error::TangentError(err)) = run_line(line, &mut Session::default()) else {
            panic!("expected a tangent error");
        };
        assert_eq!(err.spans, vec![15..16]);
    }

    #[test]
    fn bad_commands() {
        let mut session = Session::default();
        assert!(matches!(run_line(":nope", &mut session), Err(Error::CommandError(_))));
        assert!(matches!(run_line(":format latex", &mut session), Err(Error::CommandError(_))));
        assert!(matches!(run_line(":higher two x^2", &mut session), Err(Error::CommandError(_))));
        assert!(matches!(run_line(":tangent x^2", &mut session), Err(Error::CommandError(_))));
    }

    #[test]
    fn command_line() {
        let args = ["--html", "--var", "t", "input.txt"].map(String::from);
        let (session, filename) = parse_args(args.into_iter()).unwrap();
        assert_eq!(session.symbol, "t");
        assert_eq!(session.options.format, OutputFormat::Html);
        assert_eq!(filename.as_deref(), Some("input.txt"));

        assert!(parse_args(["--var"].map(String::from).into_iter()).is_err());
    }
}
