//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use std::io;

use thiserror::Error;

use crate::console::ConsoleError;
use crate::storage::StorageError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable or invalid
    #[error("{0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Console(#[from] ConsoleError),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "HBNB_CLI_CONFIG_ERROR",
            CliError::Io(_) => "HBNB_CLI_IO_ERROR",
            CliError::Storage(e) => e.code(),
            CliError::Console(ConsoleError::Storage(e)) => e.code(),
            CliError::Console(ConsoleError::Io(_)) => "HBNB_CLI_IO_ERROR",
        }
    }
}
