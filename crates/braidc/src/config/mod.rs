//! Command-line configuration.

use std::fmt;
use std::path::PathBuf;

use braid::{ParseOptions, DEFAULT_MAX_DEPTH};

use crate::CliError;

/// Which reference grammar to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarKind {
    Json,
    Arith,
    Float,
}

impl GrammarKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(GrammarKind::Json),
            "arith" => Some(GrammarKind::Arith),
            "float" => Some(GrammarKind::Float),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GrammarKind::Json => "json",
            GrammarKind::Arith => "arith",
            GrammarKind::Float => "float",
        }
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the text to parse comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

/// Configuration for one `braid` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub grammar: GrammarKind,
    pub input: InputSource,
    /// Parse each non-empty line as its own input.
    pub lines: bool,
    /// Spread line mode across threads.
    pub parallel: bool,
    /// Treat a match that leaves input behind as success.
    pub allow_partial: bool,
    /// `None` disables the nesting limit.
    pub max_depth: Option<usize>,
    pub trace_tree: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            grammar: GrammarKind::Json,
            input: InputSource::Stdin,
            lines: false,
            parallel: true,
            allow_partial: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            trace_tree: false,
        }
    }
}

impl CliConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
        }
    }
}

/// Parse the arguments that follow the program name.
///
/// The first argument names the grammar. At most one positional argument
/// may follow it as inline input; flags may appear anywhere after the
/// grammar name. `--max-depth=none` removes the nesting limit.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<CliConfig, CliError> {
    let (name, rest) = args.split_first().ok_or(CliError::MissingGrammar)?;
    let name = name.as_ref();
    let grammar =
        GrammarKind::from_name(name).ok_or_else(|| CliError::UnknownGrammar(name.to_string()))?;

    let mut config = CliConfig {
        grammar,
        ..CliConfig::default()
    };
    let mut inline: Option<String> = None;
    let mut file: Option<PathBuf> = None;

    for arg in rest {
        let arg = arg.as_ref();
        if let Some(path) = arg.strip_prefix("--file=") {
            file = Some(PathBuf::from(path));
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            config.max_depth = parse_depth(depth)?;
        } else if arg == "--lines" {
            config.lines = true;
        } else if arg == "--no-parallel" {
            config.parallel = false;
        } else if arg == "--allow-partial" {
            config.allow_partial = true;
        } else if arg == "--trace-tree" {
            config.trace_tree = true;
        } else if arg.starts_with("--") {
            return Err(CliError::UnknownOption(arg.to_string()));
        } else if inline.is_none() {
            inline = Some(arg.to_string());
        } else {
            return Err(CliError::UnexpectedArgument(arg.to_string()));
        }
    }

    config.input = match (inline, file) {
        (Some(_), Some(_)) => return Err(CliError::ConflictingInput),
        (Some(text), None) => InputSource::Inline(text),
        (None, Some(path)) => InputSource::File(path),
        (None, None) => InputSource::Stdin,
    };
    Ok(config)
}

fn parse_depth(value: &str) -> Result<Option<usize>, CliError> {
    if value == "none" {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(Some(depth)),
        _ => Err(CliError::InvalidMaxDepth(value.to_string())),
    }
}
