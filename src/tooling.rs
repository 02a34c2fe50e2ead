//! Tooling Layer
//!
//! The `flattree` command line: argument parsing, command dispatch and text
//! or JSON rendering of results.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
