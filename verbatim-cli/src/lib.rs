//! verbatim CLI library
//!
//! This library provides the command-line interface for Do-Not-Translate
//! processing of machine translation corpora.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use commands::Cli;
pub use error::{CliError, CliResult};
