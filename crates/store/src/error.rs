//! Storage error types.

use std::io;
use std::path::PathBuf;

use fxwallet_core::currency::RateTableError;
use fxwallet_core::wallet::DirectoryError;
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while reading or writing data files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be opened, read or written.
    #[error("Unable to access {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file content is not valid JSON for the expected shape.
    #[error("Unable to parse {}: {source}", path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A feed line could not be read.
    #[error("Unable to read transaction line {line_number}: {source}")]
    Feed {
        /// 1-based line number.
        line_number: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The rates violate the table invariants.
    #[error(transparent)]
    RateTable(#[from] RateTableError),

    /// The users violate the directory invariants.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
