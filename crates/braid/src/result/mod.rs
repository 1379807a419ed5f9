//! Two-way parse result.
//!
//! Every combinator answers with a [`ParseResult`]:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Success` | Matched; `tokens` were produced, `rest` is left over |
//! | `Failure` | Did not match; carries nothing |
//!
//! A failure has no payload on purpose: `or_else` and `optional` absorb it
//! and retry from the original position, so there is nothing to report.
//! Problems in the grammar itself are `GrammarError`s and never show up here.
//!
//! ## Invariants
//!
//! - `rest` is a suffix of the slice handed to the outermost parser.
//! - `tokens` are in left-to-right consumption order.

/// Outcome of running a parser over an input slice.
///
/// The lifetime `'i` ties the remainder to the input, so a success can only
/// ever point back into the text that was parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseResult<'i, T> {
    /// The parser matched a prefix of the input.
    Success {
        /// Tokens produced, in consumption order.
        tokens: Vec<T>,
        /// Unconsumed suffix of the input.
        rest: &'i str,
    },

    /// The parser did not match.
    Failure,
}

impl<'i, T> ParseResult<'i, T> {
    // === Constructors ===

    /// Create a successful result.
    #[inline]
    pub fn success(tokens: Vec<T>, rest: &'i str) -> Self {
        Self::Success { tokens, rest }
    }

    /// Create a successful result that produced no tokens.
    #[inline]
    pub fn empty(rest: &'i str) -> Self {
        Self::Success {
            tokens: Vec::new(),
            rest,
        }
    }

    /// Create a failed result.
    #[inline]
    pub fn failure() -> Self {
        Self::Failure
    }

    // === Predicates ===

    /// Returns `true` if the parse succeeded.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` if the parse failed.
    #[inline]
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Returns `true` if the parse succeeded and consumed the whole input.
    ///
    /// The engine never enforces full consumption; top-level callers that
    /// need it check this.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Success { rest, .. } if rest.is_empty())
    }

    // === Accessors ===

    /// The produced tokens, if successful.
    pub fn tokens(&self) -> Option<&[T]> {
        match self {
            Self::Success { tokens, .. } => Some(tokens),
            Self::Failure => None,
        }
    }

    /// The unconsumed remainder, if successful.
    pub fn rest(&self) -> Option<&'i str> {
        match self {
            Self::Success { rest, .. } => Some(rest),
            Self::Failure => None,
        }
    }

    /// The prefix of `input` this result consumed.
    ///
    /// Returns `None` on failure, or when `rest` is not a suffix of `input`
    /// (the result came from parsing some other slice).
    pub fn consumed<'a>(&self, input: &'a str) -> Option<&'a str> {
        let rest = self.rest()?;
        let split = input.len().checked_sub(rest.len())?;
        if input.get(split..)? == rest {
            input.get(..split)
        } else {
            None
        }
    }

    // === Transformations ===

    /// Map the token sequence, preserving the remainder.
    pub fn map_tokens<U, F: FnOnce(Vec<T>) -> Vec<U>>(self, f: F) -> ParseResult<'i, U> {
        match self {
            Self::Success { tokens, rest } => ParseResult::Success {
                tokens: f(tokens),
                rest,
            },
            Self::Failure => ParseResult::Failure,
        }
    }

    /// Chain a parse of the remainder, concatenating tokens on success.
    ///
    /// Any failure, including one in `f` after this result succeeded,
    /// discards everything matched so far.
    pub fn and_then<F: FnOnce(&'i str) -> ParseResult<'i, T>>(self, f: F) -> Self {
        match self {
            Self::Success { mut tokens, rest } => match f(rest) {
                Self::Success {
                    tokens: more,
                    rest,
                } => {
                    tokens.extend(more);
                    Self::Success { tokens, rest }
                }
                Self::Failure => Self::Failure,
            },
            Self::Failure => Self::Failure,
        }
    }

    /// Return this result if it succeeded, otherwise evaluate `f`.
    #[must_use]
    pub fn or_else<F: FnOnce() -> Self>(self, f: F) -> Self {
        match self {
            Self::Success { .. } => self,
            Self::Failure => f(),
        }
    }

    /// Convert to `Option`, discarding the variant name.
    pub fn into_option(self) -> Option<(Vec<T>, &'i str)> {
        match self {
            Self::Success { tokens, rest } => Some((tokens, rest)),
            Self::Failure => None,
        }
    }

    /// Unwrap the success pair, panicking on failure.
    ///
    /// # Panics
    /// Panics if this is `Failure`.
    #[track_caller]
    pub fn unwrap(self) -> (Vec<T>, &'i str) {
        match self {
            Self::Success { tokens, rest } => (tokens, rest),
            Self::Failure => panic!("called `ParseResult::unwrap()` on `Failure`"),
        }
    }
}

impl<'i, T> From<ParseResult<'i, T>> for Option<(Vec<T>, &'i str)> {
    fn from(result: ParseResult<'i, T>) -> Self {
        result.into_option()
    }
}
