//! The parse command behind the `braid` binary.
//!
//! Input is read once, optionally split into lines, and each piece is
//! parsed independently with the selected grammar. Line mode fans out over
//! a rayon pool and falls back to sequential parsing if the pool cannot be
//! created.

use std::fmt;
use std::io::Read;
use std::path::Path;

use braid::{ParseOptions, ParseResult, Parser};
use braid_grammars::{ArithToken, Value};
use rayon::prelude::*;
use tracing::{debug, debug_span, warn};

use crate::config::{CliConfig, GrammarKind, InputSource};
use crate::CliError;

/// An assembled reference grammar.
///
/// The grammars produce different token types, so each family gets its own
/// variant.
#[derive(Debug)]
pub enum Grammar {
    Value(Parser<Value>),
    Arith(Parser<ArithToken>),
}

impl Grammar {
    pub fn build(kind: GrammarKind) -> Result<Self, CliError> {
        let grammar = match kind {
            GrammarKind::Json => Grammar::Value(braid_grammars::json()?),
            GrammarKind::Float => Grammar::Value(braid_grammars::float()?),
            GrammarKind::Arith => Grammar::Arith(braid_grammars::expression()?),
        };
        debug!(grammar = %kind, "grammar assembled");
        Ok(grammar)
    }

    /// Parse one input and render its tokens.
    pub fn run(&self, input: &str, options: &ParseOptions) -> Report {
        match self {
            Grammar::Value(parser) => {
                Report::from_result(parser.parse_with(input, options), Value::to_string)
            }
            Grammar::Arith(parser) => {
                Report::from_result(parser.parse_with(input, options), render_arith)
            }
        }
    }
}

/// Rendered outcome of parsing one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Matched { tokens: Vec<String>, rest: String },
    Failed,
}

impl Report {
    fn from_result<T>(result: ParseResult<'_, T>, render: impl Fn(&T) -> String) -> Self {
        match result {
            ParseResult::Success { tokens, rest } => Report::Matched {
                tokens: tokens.iter().map(render).collect(),
                rest: rest.to_string(),
            },
            ParseResult::Failure => Report::Failed,
        }
    }

    /// Whether this outcome counts as success. A match that leaves input
    /// behind only counts with `allow_partial`.
    pub fn succeeded(&self, allow_partial: bool) -> bool {
        match self {
            Report::Matched { rest, .. } => allow_partial || rest.is_empty(),
            Report::Failed => false,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Matched { tokens, rest } => {
                f.write_str(&tokens.join(", "))?;
                if !rest.is_empty() {
                    write!(f, " (unconsumed: {rest:?})")?;
                }
                Ok(())
            }
            Report::Failed => f.write_str("no match"),
        }
    }
}

fn render_arith(token: &ArithToken) -> String {
    match token {
        ArithToken::Expr(expr) => format!("{expr} = {}", expr.eval()),
        ArithToken::Op(op) => op.to_string(),
        ArithToken::Char(c) => format!("{c:?}"),
    }
}

/// Run the command described by `config`, printing one line per input.
///
/// Returns `Ok(false)` when any input failed or was only partly consumed.
pub fn run(config: &CliConfig) -> Result<bool, CliError> {
    let text = read_input(&config.input)?;
    let grammar = Grammar::build(config.grammar)?;
    let inputs = split_inputs(&text, config.lines);
    let reports = parse_inputs(
        &grammar,
        &inputs,
        &config.parse_options(),
        config.lines && config.parallel,
    );

    let mut failures = 0usize;
    for (input, report) in inputs.iter().zip(&reports) {
        if !report.succeeded(config.allow_partial) {
            failures += 1;
        }
        if config.lines {
            println!("{}: {report}", input.trim());
        } else {
            println!("{report}");
        }
    }

    if config.lines {
        println!("{} parsed, {failures} failed", reports.len() - failures);
    }
    Ok(failures == 0)
}

/// The whole text, or each line holding anything but blanks.
pub fn split_inputs(text: &str, lines: bool) -> Vec<&str> {
    if lines {
        text.lines().filter(|line| !line.trim().is_empty()).collect()
    } else {
        vec![text]
    }
}

/// Parse every input, in order.
pub fn parse_inputs(
    grammar: &Grammar,
    inputs: &[&str],
    options: &ParseOptions,
    parallel: bool,
) -> Vec<Report> {
    let parse_one = |(index, input): (usize, &&str)| {
        let _span = debug_span!("input", index).entered();
        let report = grammar.run(input, options);
        debug!(matched = !matches!(report, Report::Failed), "input parsed");
        report
    };

    if !parallel || inputs.len() < 2 {
        return inputs.iter().enumerate().map(parse_one).collect();
    }

    rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("braid-parse-{i}"))
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| inputs.par_iter().enumerate().map(parse_one).collect())
        })
        .unwrap_or_else(|e| {
            warn!("failed to create thread pool ({e}), parsing sequentially");
            inputs.iter().enumerate().map(parse_one).collect()
        })
}

/// Read the text named by `source`.
pub fn read_input(source: &InputSource) -> Result<String, CliError> {
    match source {
        InputSource::Inline(text) => Ok(text.clone()),
        InputSource::File(path) => read_file(path),
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::Read {
                    message: format!("error reading standard input: {source}"),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        let shown = path.display();
        let message = match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{shown}'"),
            std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{shown}'"),
            std::io::ErrorKind::InvalidData => format!("'{shown}' contains invalid UTF-8 data"),
            _ => format!("error reading '{shown}': {e}"),
        };
        CliError::Read { message, source: e }
    })
}
