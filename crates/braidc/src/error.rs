use braid::GrammarError;

/// Errors that stop the driver before any input is parsed.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing grammar name (expected one of: json, arith, float)")]
    MissingGrammar,

    #[error("unknown grammar '{0}' (expected one of: json, arith, float)")]
    UnknownGrammar(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value for --max-depth: '{0}'")]
    InvalidMaxDepth(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("cannot take input from both an argument and --file")]
    ConflictingInput,

    #[error("{message}")]
    Read {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("grammar failed to assemble: {0}")]
    Grammar(#[from] GrammarError),
}
