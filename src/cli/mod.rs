//! CLI module for hbnb
//!
//! Provides command-line interface for:
//! - console: interactive command loop over the store (default)
//! - exec: one-shot command execution

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{console, exec, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliResult};
