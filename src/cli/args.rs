//! CLI argument definitions using clap
//!
//! Commands:
//! - hbnb [console] [--config <path>] [--file <path>]
//! - hbnb exec <command...> [--config <path>] [--file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hbnb - a file-backed object store with an interactive console
#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backing store file (overrides the configuration)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive console (default)
    Console,

    /// Execute a single console command and exit
    Exec {
        /// Command words, e.g. `show User 1234`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
