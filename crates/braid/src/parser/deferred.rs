//! Parsers resolved at parse time.
//!
//! A grammar that refers to itself cannot be built eagerly: the rule would
//! have to contain a finished copy of itself. A [`Deferred`] node stands in
//! for the reference and is resolved only when evaluation reaches it.

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use tracing::debug;

use super::Parser;

type Builder<T> = Arc<dyn Fn() -> Parser<T> + Send + Sync>;

/// A parser obtained when evaluation first reaches it.
pub struct Deferred<T> {
    source: Source<T>,
}

enum Source<T> {
    /// Built by calling `build`; the first result is kept in `cache`.
    Thunk {
        build: Builder<T>,
        cache: Arc<OnceLock<Parser<T>>>,
    },
    /// The owning handle of a [`Parser::recursive`] rule.
    Rule(Arc<Parser<T>>),
    /// A reference from inside a rule back to itself.
    BackRef(Weak<Parser<T>>),
}

impl<T> Deferred<T> {
    pub(super) fn thunk<F>(build: F) -> Self
    where
        F: Fn() -> Parser<T> + Send + Sync + 'static,
    {
        Deferred {
            source: Source::Thunk {
                build: Arc::new(build),
                cache: Arc::new(OnceLock::new()),
            },
        }
    }

    pub(super) fn recursive(define: impl FnOnce(Parser<T>) -> Parser<T>) -> Parser<T> {
        let rule = Arc::new_cyclic(|this| {
            define(Parser::Deferred(Deferred {
                source: Source::BackRef(Weak::clone(this)),
            }))
        });
        Parser::Deferred(Deferred {
            source: Source::Rule(rule),
        })
    }

    /// The parser this node stands for.
    ///
    /// `None` for a back-reference whose rule was dropped or is still
    /// being defined.
    pub fn resolve(&self) -> Option<Parser<T>> {
        match &self.source {
            Source::Thunk { build, cache } => Some(
                cache
                    .get_or_init(|| {
                        debug!("building deferred parser");
                        build()
                    })
                    .clone(),
            ),
            Source::Rule(rule) => Some(Parser::clone(rule.as_ref())),
            Source::BackRef(weak) => weak.upgrade().map(|rule| Parser::clone(rule.as_ref())),
        }
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        let source = match &self.source {
            Source::Thunk { build, cache } => Source::Thunk {
                build: Arc::clone(build),
                cache: Arc::clone(cache),
            },
            Source::Rule(rule) => Source::Rule(Arc::clone(rule)),
            Source::BackRef(weak) => Source::BackRef(Weak::clone(weak)),
        };
        Deferred { source }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Thunk { .. } => f.write_str("deferred(..)"),
            Source::Rule(_) => f.write_str("rule(..)"),
            Source::BackRef(_) => f.write_str("self"),
        }
    }
}
