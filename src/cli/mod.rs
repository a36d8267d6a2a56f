//! CLI interface for formalsim
//!
//! Provides one-shot subcommands over the engine: compile, match, approx,
//! pda, export, grammar.

pub mod args;
pub mod commands;

pub use args::{AutomatonForm, Cli, Commands};
