//! Storage error types
//!
//! Error codes:
//! - HBNB_STORAGE_IO_ERROR - backing file could not be read or written
//! - HBNB_STORAGE_SERIALIZE_FAILED - table could not be encoded
//! - HBNB_CORRUPT_STATE - backing file exists but cannot be loaded

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage engine errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize storage table: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Persisted state cannot be loaded. Records are never dropped to
    /// recover from this.
    #[error("corrupt state in {}: {reason}", path.display())]
    CorruptState { path: PathBuf, reason: String },
}

impl StorageError {
    pub fn io_error(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        StorageError::CorruptState {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "HBNB_STORAGE_IO_ERROR",
            StorageError::Serialize(_) => "HBNB_STORAGE_SERIALIZE_FAILED",
            StorageError::CorruptState { .. } => "HBNB_CORRUPT_STATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let io = StorageError::io_error(
            Path::new("file.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.code(), "HBNB_STORAGE_IO_ERROR");
        assert!(io.to_string().contains("file.json"));

        let corrupt = StorageError::corrupt(Path::new("file.json"), "bad");
        assert_eq!(corrupt.code(), "HBNB_CORRUPT_STATE");
        assert_eq!(corrupt.to_string(), "corrupt state in file.json: bad");
    }
}
