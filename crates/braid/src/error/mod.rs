//! Errors raised while assembling a grammar or converting tokens.
//!
//! Neither type is a parse failure. A [`GrammarError`] means the grammar
//! itself is malformed and is returned by the fallible constructors before
//! any input is seen. A [`ConvertError`] is returned by a semantic action;
//! the evaluator turns it into an ordinary `ParseResult::Failure`.

use thiserror::Error;

/// A malformed grammar, detected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A literal was built from an empty string.
    #[error("literal must be exactly one character, got an empty string")]
    EmptyLiteral,

    /// A literal was built from a string of more than one character.
    #[error("literal must be exactly one character, got {len} in {text:?}")]
    MultiCharLiteral {
        /// The offending text.
        text: String,
        /// Number of characters in `text`.
        len: usize,
    },

    /// An ordered choice was folded from zero alternatives.
    #[error("choice needs at least one alternative")]
    EmptyChoice,

    /// A sequence was folded from zero parsers.
    #[error("sequence needs at least one parser")]
    EmptySequence,
}

/// A semantic action rejected the tokens it was given.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConvertError {
    message: String,
}

impl ConvertError {
    /// Create a conversion error with a description of what went wrong.
    pub fn new(message: impl Into<String>) -> Self {
        ConvertError {
            message: message.into(),
        }
    }

    /// The description given at construction.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ConvertError {
    fn from(message: String) -> Self {
        ConvertError { message }
    }
}

impl From<&str> for ConvertError {
    fn from(message: &str) -> Self {
        ConvertError::new(message)
    }
}
