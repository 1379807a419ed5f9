//! Stack growth for deeply nested combinator evaluation.
//!
//! A combinator tree is evaluated by plain recursive descent: every
//! `Sequence`, `Choice`, `Convert` or `Deferred` node adds a native frame
//! for each nested evaluation. Recursive grammars (nested JSON arrays,
//! parenthesised arithmetic) therefore recurse as deep as their input is
//! nested. Evaluating each node through [`ensure_sufficient_stack`] keeps
//! that recursion from overflowing the thread's stack.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` switches to a freshly allocated segment
//!   when the remaining stack drops below the red zone.
//! - **WASM targets**: pass-through; the host manages the stack.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, node: &Parser<T>, input: &'i str) -> ParseResult<'i, T> {
///     ensure_sufficient_stack(|| self.eval_node(node, input))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left on the current segment, when the platform can tell.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// WASM version: unknown.
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
