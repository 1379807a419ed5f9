//! Reference grammars for the braid combinators.
//!
//! Each grammar is plain client code: it only uses the public `braid` API
//! and shows one way of shaping tokens with converters.
//!
//! - [`common::float`]: a signed decimal number with surrounding blanks.
//! - [`arith::expression`]: `+ - * /` with parentheses, into an [`arith::Expr`].
//! - [`json::json`]: JSON values, into a [`Value`].

pub mod arith;
pub mod common;
pub mod convert;
pub mod json;
pub mod value;

pub use arith::{expression, ArithToken, Expr, Operator};
pub use common::float;
pub use json::{json, Json};
pub use value::Value;
