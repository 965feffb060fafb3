use curator_ingest::IngestError;
use thiserror::Error;

/// Errors that end an import run before all rows are processed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Source(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
