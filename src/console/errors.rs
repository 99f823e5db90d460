//! Console error types
//!
//! User mistakes are `Diagnostic`s, not errors. These are the failures the
//! console cannot report at the prompt: broken output or a failed persist.

use std::io;

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
