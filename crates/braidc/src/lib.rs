//! Braid command-line driver.
//!
//! Parses text with one of the reference grammars and reports the tokens.
//! The binary in `main.rs` only splits arguments and maps the outcome to an
//! exit status; everything else lives here so it can be tested.

pub mod commands;
pub mod config;
mod error;
pub mod tracing_setup;

pub use error::CliError;
