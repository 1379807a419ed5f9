//! The combinator algebra.
//!
//! A grammar is a tree of [`Parser`] nodes. Each node is one of a fixed set
//! of variants; composition builds new nodes around `Arc`-shared children,
//! so grammars are cheap to clone and can be shared between threads.
//!
//! | Builder | Operator | Meaning |
//! |---------|----------|---------|
//! | [`Parser::literal`] | | one fixed character |
//! | [`Parser::then`] | `a + b` | `a`, then `b` on what `a` left |
//! | [`Parser::or_else`] | `a \| b` | `a`, or else `b` from the same position |
//! | [`Parser::and`] | `a & b` | both match here; keep `b`'s result |
//! | [`Parser::not`] | `!a` | succeed without consuming iff `a` fails |
//! | [`Parser::repeat`] | | one or more |
//! | [`Parser::optional`] | | zero or one |
//! | [`Parser::suppress`] | | consume, keep no tokens |
//! | [`Parser::convert`] | | replace tokens with one derived token |
//! | [`Parser::deferred`] | | build the parser at parse time |
//! | [`Parser::recursive`] | | self-referential rule |

mod deferred;
mod eval;

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::error::{ConvertError, GrammarError};
use crate::options::ParseOptions;
use crate::result::ParseResult;

pub use deferred::Deferred;
use eval::Evaluator;

/// A semantic action: maps a token sequence to one token, or rejects it.
pub type Converter<T> = Arc<dyn Fn(Vec<T>) -> Result<T, ConvertError> + Send + Sync>;

/// A node of a combinator grammar.
///
/// Nodes are immutable once built and hold no per-parse state, so one tree
/// can serve any number of parses, sequentially or concurrently.
///
/// Prefer the builder methods and operators over naming variants directly;
/// they are public so that grammars can be inspected.
pub enum Parser<T> {
    /// Matches exactly one character.
    Literal(char),
    /// Runs the first parser, then the second on the remainder.
    Sequence(Arc<Parser<T>>, Arc<Parser<T>>),
    /// Runs the first parser; on failure runs the second on the same input.
    Choice(Arc<Parser<T>>, Arc<Parser<T>>),
    /// One or more applications of the inner parser.
    Repeat(Arc<Parser<T>>),
    /// The inner parser, or an empty success.
    Optional(Arc<Parser<T>>),
    /// The inner parser's consumption without its tokens.
    Suppress(Arc<Parser<T>>),
    /// The inner parser's tokens collapsed into one by a converter.
    Convert(Arc<Parser<T>>, Converter<T>),
    /// A parser obtained at parse time.
    Deferred(Deferred<T>),
    /// Negative lookahead.
    Not(Arc<Parser<T>>),
    /// Conjunction at one position; the second parser's result is kept.
    And(Arc<Parser<T>>, Arc<Parser<T>>),
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        match self {
            Parser::Literal(c) => Parser::Literal(*c),
            Parser::Sequence(a, b) => Parser::Sequence(Arc::clone(a), Arc::clone(b)),
            Parser::Choice(a, b) => Parser::Choice(Arc::clone(a), Arc::clone(b)),
            Parser::Repeat(p) => Parser::Repeat(Arc::clone(p)),
            Parser::Optional(p) => Parser::Optional(Arc::clone(p)),
            Parser::Suppress(p) => Parser::Suppress(Arc::clone(p)),
            Parser::Convert(p, f) => Parser::Convert(Arc::clone(p), Arc::clone(f)),
            Parser::Deferred(d) => Parser::Deferred(d.clone()),
            Parser::Not(p) => Parser::Not(Arc::clone(p)),
            Parser::And(a, b) => Parser::And(Arc::clone(a), Arc::clone(b)),
        }
    }
}

impl<T> Parser<T> {
    // === Primitives ===

    /// Match the character `c`.
    pub fn literal(c: char) -> Self {
        Parser::Literal(c)
    }

    /// Match the single character spelled by `text`.
    ///
    /// Rejects empty and multi-character strings up front; a malformed
    /// literal is a bug in the grammar, not a mismatch in the input.
    pub fn try_literal(text: &str) -> Result<Self, GrammarError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(GrammarError::EmptyLiteral),
            (Some(c), None) => Ok(Parser::Literal(c)),
            (Some(_), Some(_)) => Err(GrammarError::MultiCharLiteral {
                text: text.to_owned(),
                len: text.chars().count(),
            }),
        }
    }

    /// Match the characters of `text` in order, one token per character.
    pub fn literals(text: &str) -> Result<Self, GrammarError> {
        Self::sequence(text.chars().map(Parser::Literal))
    }

    /// Match any one of the characters of `chars`, tried left to right.
    pub fn one_of(chars: &str) -> Result<Self, GrammarError> {
        Self::choice(chars.chars().map(Parser::Literal))
    }

    /// Left-fold parsers into a sequence.
    pub fn sequence(parsers: impl IntoIterator<Item = Self>) -> Result<Self, GrammarError> {
        parsers
            .into_iter()
            .reduce(Parser::then)
            .ok_or(GrammarError::EmptySequence)
    }

    /// Left-fold alternatives into an ordered choice; earlier ones win.
    pub fn choice(alternatives: impl IntoIterator<Item = Self>) -> Result<Self, GrammarError> {
        alternatives
            .into_iter()
            .reduce(Parser::or_else)
            .ok_or(GrammarError::EmptyChoice)
    }

    // === Composition ===

    /// Run `self`, then `next` on the remainder; tokens are concatenated.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Parser::Sequence(Arc::new(self), Arc::new(next))
    }

    /// Run `self`; if it fails, run `alternative` on the same input.
    #[must_use]
    pub fn or_else(self, alternative: Self) -> Self {
        Parser::Choice(Arc::new(self), Arc::new(alternative))
    }

    /// Require both `self` and `other` to match at the same position and
    /// return `other`'s result.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Parser::And(Arc::new(self), Arc::new(other))
    }

    /// Succeed without consuming input exactly when `self` fails.
    #[allow(
        clippy::should_implement_trait,
        reason = "`Not` is implemented too and forwards here"
    )]
    #[must_use]
    pub fn not(self) -> Self {
        Parser::Not(Arc::new(self))
    }

    /// Match `self` one or more times.
    ///
    /// An application that succeeds without consuming input ends the
    /// repetition, so `p.optional().repeat()` terminates.
    #[must_use]
    pub fn repeat(self) -> Self {
        Parser::Repeat(Arc::new(self))
    }

    /// Match `self` zero or more times.
    #[must_use]
    pub fn zero_or_more(self) -> Self {
        self.repeat().optional()
    }

    /// Match `self`, or succeed with no tokens and no consumption.
    #[must_use]
    pub fn optional(self) -> Self {
        Parser::Optional(Arc::new(self))
    }

    /// Match `self` but drop its tokens.
    #[must_use]
    pub fn suppress(self) -> Self {
        Parser::Suppress(Arc::new(self))
    }

    /// Replace the tokens of `self` with the single token `f` derives.
    ///
    /// When `f` returns an error the node fails like any other mismatch, so
    /// an enclosing `or_else` can still try its alternative.
    #[must_use]
    pub fn convert<F>(self, f: F) -> Self
    where
        F: Fn(Vec<T>) -> Result<T, ConvertError> + Send + Sync + 'static,
    {
        Parser::Convert(Arc::new(self), Arc::new(f))
    }

    /// Infallible form of [`Parser::convert`].
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Vec<T>) -> T + Send + Sync + 'static,
    {
        self.convert(move |tokens| Ok(f(tokens)))
    }

    // === Recursion ===

    /// A parser produced by `build` when it is first reached during a parse.
    ///
    /// Lets a grammar refer to rules that are not assembled yet, typically a
    /// function that builds the rule containing this node. The built parser
    /// is kept for later parses through this node.
    ///
    /// A builder that returns a fresh tree on each call, such as
    /// `fn list() -> Parser<char>` containing `Parser::deferred(list)`, adds
    /// one cached subtree per nesting level a parse reaches, and those stay
    /// alive with the root grammar. For self-reference prefer
    /// [`Parser::recursive`], which shares a single tree.
    pub fn deferred<F>(build: F) -> Self
    where
        F: Fn() -> Parser<T> + Send + Sync + 'static,
    {
        Parser::Deferred(Deferred::thunk(build))
    }

    /// A self-referential rule.
    ///
    /// `define` receives a handle standing for the finished rule and returns
    /// the rule's body:
    ///
    /// ```
    /// use braid::Parser;
    ///
    /// // nested := '(' nested? ')'
    /// let nested = Parser::<char>::recursive(|nested| {
    ///     Parser::literal('(') + nested.optional() + Parser::literal(')')
    /// });
    /// assert!(nested.parse("((()))").is_complete());
    /// ```
    ///
    /// The handle holds the rule weakly, so the grammar forms no reference
    /// cycle and is freed with the returned parser.
    pub fn recursive(define: impl FnOnce(Parser<T>) -> Parser<T>) -> Self {
        Deferred::recursive(define)
    }

    // === Evaluation ===

    /// Parse `input` with default options.
    pub fn parse<'i>(&self, input: &'i str) -> ParseResult<'i, T>
    where
        T: From<char>,
    {
        self.parse_with(input, &ParseOptions::default())
    }

    /// Parse `input` under explicit options.
    ///
    /// A parse that exceeds `options.max_depth` anywhere fails as a whole,
    /// even if an enclosing choice or lookahead would have absorbed the
    /// nested failure.
    pub fn parse_with<'i>(&self, input: &'i str, options: &ParseOptions) -> ParseResult<'i, T>
    where
        T: From<char>,
    {
        let mut evaluator = Evaluator::new(options);
        let result = evaluator.eval(self, input);
        if evaluator.exceeded_depth() {
            ParseResult::Failure
        } else {
            result
        }
    }

    /// Parse `input` and fail unless all of it was consumed.
    pub fn parse_complete<'i>(&self, input: &'i str) -> ParseResult<'i, T>
    where
        T: From<char>,
    {
        match self.parse(input) {
            result @ ParseResult::Success { rest: "", .. } => result,
            _ => ParseResult::Failure,
        }
    }
}

impl<T> From<char> for Parser<T> {
    fn from(c: char) -> Self {
        Parser::Literal(c)
    }
}

// === Operators ===

impl<T> Add for Parser<T> {
    type Output = Parser<T>;

    fn add(self, rhs: Self) -> Self::Output {
        self.then(rhs)
    }
}

impl<T> Add for &Parser<T> {
    type Output = Parser<T>;

    fn add(self, rhs: Self) -> Self::Output {
        self.clone().then(rhs.clone())
    }
}

impl<T> BitOr for Parser<T> {
    type Output = Parser<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or_else(rhs)
    }
}

impl<T> BitOr for &Parser<T> {
    type Output = Parser<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone().or_else(rhs.clone())
    }
}

impl<T> BitAnd for Parser<T> {
    type Output = Parser<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<T> BitAnd for &Parser<T> {
    type Output = Parser<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone().and(rhs.clone())
    }
}

impl<T> Not for Parser<T> {
    type Output = Parser<T>;

    fn not(self) -> Self::Output {
        Parser::not(self)
    }
}

impl<T> Not for &Parser<T> {
    type Output = Parser<T>;

    fn not(self) -> Self::Output {
        Parser::not(self.clone())
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parser::Literal(c) => write!(f, "{c:?}"),
            Parser::Sequence(a, b) => write!(f, "({a:?} + {b:?})"),
            Parser::Choice(a, b) => write!(f, "({a:?} | {b:?})"),
            Parser::Repeat(p) => write!(f, "repeat({p:?})"),
            Parser::Optional(p) => write!(f, "optional({p:?})"),
            Parser::Suppress(p) => write!(f, "suppress({p:?})"),
            Parser::Convert(p, _) => write!(f, "convert({p:?})"),
            Parser::Deferred(d) => write!(f, "{d:?}"),
            Parser::Not(p) => write!(f, "!{p:?}"),
            Parser::And(a, b) => write!(f, "({a:?} & {b:?})"),
        }
    }
}
