//! Building blocks shared by the grammars.
//!
//! Builders are generic over the token type where they only match
//! characters, so the arithmetic grammar can reuse them with its own
//! tokens.

use braid::{GrammarError, Parser};

use crate::convert::{join_chars, to_number};
use crate::value::Value;

/// Characters skipped between tokens.
pub const BLANKS: &str = " \t\r\n";

/// One decimal digit.
pub fn digit<T>() -> Result<Parser<T>, GrammarError> {
    Parser::one_of("0123456789")
}

/// One or more decimal digits.
pub fn digits<T>() -> Result<Parser<T>, GrammarError> {
    Ok(digit()?.repeat())
}

/// Any run of blanks, possibly empty, producing no tokens.
pub fn spaces<T>() -> Result<Parser<T>, GrammarError> {
    Ok(Parser::one_of(BLANKS)?.zero_or_more().suppress())
}

/// The characters of `word`, folded into one [`Value::Str`].
pub fn word(word: &str) -> Result<Parser<Value>, GrammarError> {
    Ok(Parser::literals(word)?.convert(join_chars))
}

/// Sign, integer digits and optional fraction, with no blanks allowed.
pub fn raw_float<T>() -> Result<Parser<T>, GrammarError> {
    let sign = Parser::literal('-').optional();
    let fraction = (Parser::literal('.') + digits()?).optional();
    Ok(sign + digits()? + fraction)
}

/// A signed decimal number surrounded by optional blanks.
///
/// `float()` on `"10123.1  rest"` yields `[Number(10123.1)]` and leaves
/// `"rest"`.
pub fn float() -> Result<Parser<Value>, GrammarError> {
    Ok(spaces()? + raw_float()?.convert(to_number) + spaces()?)
}
