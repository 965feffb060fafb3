//! Per-row outcomes that do not abort an import.

use thiserror::Error;

/// Why a row was not handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The key column is absent, or blank after trimming.
    #[error("missing {field}")]
    MissingKeyField { field: String },

    /// The line could not be decoded into cells.
    #[error("malformed record: {message}")]
    MalformedRecord { message: String },

    /// The key value was already imported from an earlier row.
    #[error("duplicate key '{key}' (first seen on row {first_row})")]
    DuplicateKey { key: String, first_row: usize },
}

/// A sink's refusal to store a single item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The backend rejected the item itself (shape, size, key schema).
    #[error("item rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or did not answer in time.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A local write failed.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_display() {
        let reason = SkipReason::MissingKeyField {
            field: "AssetTag".to_string(),
        };
        assert_eq!(reason.to_string(), "missing AssetTag");

        let reason = SkipReason::DuplicateKey {
            key: "A1".to_string(),
            first_row: 2,
        };
        assert_eq!(reason.to_string(), "duplicate key 'A1' (first seen on row 2)");
    }

    #[test]
    fn write_error_from_io() {
        let err: WriteError = std::io::Error::other("disk full").into();
        assert_eq!(err, WriteError::Io("disk full".to_string()));
    }
}
