//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the import source.
///
/// Everything except [`IngestError::MalformedRecord`] ends the run.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File starts with a byte-order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// The header line could not be decoded.
    #[error("failed to parse header of {path}: {message}")]
    HeaderParse { path: PathBuf, message: String },

    /// Reading stopped part way through the file.
    #[error("failed to read row {row} of {path}: {message}")]
    RecordRead {
        path: PathBuf,
        row: usize,
        message: String,
    },

    /// A single data line could not be decoded; later lines are still readable.
    #[error("malformed row {row}: {message}")]
    MalformedRecord { row: usize, message: String },
}

impl IngestError {
    /// Returns true if reading cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedRecord { .. })
    }

    pub(crate) fn open(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
