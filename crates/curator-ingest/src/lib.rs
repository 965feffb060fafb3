//! Source ingestion for the device import.
//!
//! This crate opens the CSV export, checks its encoding, and streams data
//! lines as [`curator_model::Row`] values one at a time.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use curator_ingest::CsvSource;
//!
//! let mut source = CsvSource::open(Path::new("devices.csv"))?;
//! println!("columns: {:?}", source.headers());
//! for row in source.rows() {
//!     let row = row?;
//!     println!("row {} has {} cells", row.number, row.len());
//! }
//! ```

mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use source::{
    ColumnStatus, CsvSource, HeaderColumn, Rows, inspect_headers, validate_encoding,
};
