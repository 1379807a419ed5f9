//! The backtracking evaluator.
//!
//! One recursive walk over the grammar tree. Every node evaluation passes
//! through [`Evaluator::eval`], which enforces the depth limit and grows the
//! stack when needed; [`Evaluator::eval_node`] holds the per-variant rules.
//!
//! Backtracking needs no bookkeeping: input is an immutable `&str`, so
//! "restoring the position" for an alternative is just reusing the slice
//! the failed branch started from.

use braid_stack::ensure_sufficient_stack;
use tracing::{debug, trace, warn};

use super::Parser;
use crate::options::ParseOptions;
use crate::result::ParseResult;

/// Per-invocation evaluation state.
///
/// Grammars are immutable; everything that changes during a parse lives
/// here and is dropped when the parse returns.
pub(super) struct Evaluator {
    max_depth: Option<usize>,
    depth: usize,
    exceeded: bool,
}

impl Evaluator {
    pub(super) fn new(options: &ParseOptions) -> Self {
        Evaluator {
            max_depth: options.max_depth,
            depth: 0,
            exceeded: false,
        }
    }

    /// Whether any evaluation in this parse hit the depth limit.
    pub(super) fn exceeded_depth(&self) -> bool {
        self.exceeded
    }

    pub(super) fn eval<'i, T: From<char>>(
        &mut self,
        parser: &Parser<T>,
        input: &'i str,
    ) -> ParseResult<'i, T> {
        if let Some(max) = self.max_depth {
            if self.depth >= max {
                if !self.exceeded {
                    warn!(max_depth = max, "parse exceeded maximum nesting depth");
                    self.exceeded = true;
                }
                return ParseResult::Failure;
            }
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.eval_node(parser, input));
        self.depth -= 1;
        result
    }

    fn eval_node<'i, T: From<char>>(
        &mut self,
        parser: &Parser<T>,
        input: &'i str,
    ) -> ParseResult<'i, T> {
        match parser {
            Parser::Literal(expected) => {
                let mut chars = input.chars();
                match chars.next() {
                    Some(c) if c == *expected => {
                        ParseResult::success(vec![T::from(c)], chars.as_str())
                    }
                    _ => ParseResult::Failure,
                }
            }

            Parser::Sequence(first, second) => self
                .eval(first, input)
                .and_then(|rest| self.eval(second, rest)),

            Parser::Choice(first, second) => self
                .eval(first, input)
                .or_else(|| self.eval(second, input)),

            Parser::Repeat(inner) => self.eval_repeat(inner, input),

            Parser::Optional(inner) => self
                .eval(inner, input)
                .or_else(|| ParseResult::empty(input)),

            Parser::Suppress(inner) => match self.eval(inner, input) {
                ParseResult::Success { rest, .. } => ParseResult::empty(rest),
                ParseResult::Failure => ParseResult::Failure,
            },

            Parser::Convert(inner, convert) => match self.eval(inner, input) {
                ParseResult::Success { tokens, rest } => match convert(tokens) {
                    Ok(token) => ParseResult::success(vec![token], rest),
                    Err(error) => {
                        debug!(%error, "converter rejected tokens");
                        ParseResult::Failure
                    }
                },
                ParseResult::Failure => ParseResult::Failure,
            },

            Parser::Deferred(deferred) => match deferred.resolve() {
                Some(resolved) => self.eval(&resolved, input),
                None => {
                    warn!("recursive reference evaluated while its rule is unavailable");
                    ParseResult::Failure
                }
            },

            Parser::Not(inner) => {
                if self.eval(inner, input).is_ok() {
                    ParseResult::Failure
                } else {
                    ParseResult::empty(input)
                }
            }

            Parser::And(first, second) => {
                if self.eval(first, input).is_ok() {
                    self.eval(second, input)
                } else {
                    ParseResult::Failure
                }
            }
        }
    }

    /// One-or-more, as a loop.
    ///
    /// Stops at the first failed application, or right after an
    /// application that consumed nothing (it would match forever).
    fn eval_repeat<'i, T: From<char>>(
        &mut self,
        inner: &Parser<T>,
        input: &'i str,
    ) -> ParseResult<'i, T> {
        let ParseResult::Success {
            mut tokens,
            mut rest,
        } = self.eval(inner, input)
        else {
            return ParseResult::Failure;
        };

        let mut count = 1_usize;
        let mut progressed = rest.len() < input.len();
        while progressed {
            match self.eval(inner, rest) {
                ParseResult::Success {
                    tokens: more,
                    rest: next,
                } => {
                    progressed = next.len() < rest.len();
                    tokens.extend(more);
                    rest = next;
                    count += 1;
                }
                ParseResult::Failure => break,
            }
        }

        trace!(count, "repetition matched");
        ParseResult::success(tokens, rest)
    }
}
