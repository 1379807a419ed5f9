//! Backtracking parser combinators.
//!
//! Grammars are ordinary values assembled from a small algebra of parsers
//! and evaluated by recursive descent with ordered choice. There is no
//! generation step: build the tree once, then call [`parse`] on any number
//! of inputs.
//!
//! ```
//! use braid::{parse, Parser, ParseResult};
//!
//! let digit = Parser::<char>::one_of("0123456789")?;
//! let number = Parser::literal('-').optional() + digit.repeat();
//!
//! assert_eq!(
//!     parse(&number, "-42 rest"),
//!     ParseResult::success(vec!['-', '4', '2'], " rest"),
//! );
//! assert_eq!(parse(&number, "x"), ParseResult::Failure);
//! # Ok::<(), braid::GrammarError>(())
//! ```
//!
//! # Tokens
//!
//! A parser over token type `T` produces `Vec<T>`. Literals emit
//! `T::from(c)`; [`Parser::convert`] replaces a token run with one derived
//! token of the same type, so a grammar usually defines an enum covering
//! both raw characters and the values it builds.
//!
//! # Failures
//!
//! A mismatch is [`ParseResult::Failure`] and carries nothing. Malformed
//! grammars are reported as [`GrammarError`] when they are built, and
//! converter errors ([`ConvertError`]) become failures at the node that
//! produced them.

mod error;
mod options;
mod parser;
mod result;

pub use error::{ConvertError, GrammarError};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{Converter, Deferred, Parser};
pub use result::ParseResult;

/// Run `parser` over `input` with default options.
///
/// The result's remainder may be non-empty; use
/// [`ParseResult::is_complete`] when the whole input must match.
pub fn parse<'i, T: From<char>>(parser: &Parser<T>, input: &'i str) -> ParseResult<'i, T> {
    parser.parse(input)
}
