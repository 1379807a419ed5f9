//! Evaluation options.

/// Default cap on evaluation nesting depth.
///
/// The depth counts nested node evaluations, not nesting in the input. A
/// JSON array level costs about fifteen nodes and a parenthesised
/// arithmetic level about ten, so this admits several thousand levels of
/// either. The limit bounds stack use only; total work is the grammar's
/// concern.
pub const DEFAULT_MAX_DEPTH: usize = 100_000;

/// Options for a single parse invocation.
///
/// Options never change what a grammar matches within the limits they set;
/// they only bound the resources a parse may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth of node evaluations. A parse that would nest
    /// deeper fails instead. `None` disables the limit (stack growth still
    /// applies).
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ParseOptions {
    /// Options with the default depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with no depth limit.
    pub fn unlimited() -> Self {
        ParseOptions { max_depth: None }
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
