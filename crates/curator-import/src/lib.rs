//! Core of the device import.
//!
//! Rows are read from the CSV source, normalized into string-only items,
//! checked for the required key field, and handed one at a time to an
//! [`ItemSink`]. Per-row problems are counted and logged; only a source that
//! cannot be opened or read ends the run early.
//!
//! # Example
//!
//! ```ignore
//! use curator_import::{Importer, ImporterConfig, MemorySink};
//!
//! let config = ImporterConfig::default().with_source_path("devices.csv");
//! let mut sink = MemorySink::new(&config.key_field);
//! let summary = Importer::new(config)?.run(&mut sink)?;
//! println!("{} of {} rows written", summary.succeeded, summary.seen);
//! ```

pub mod config;
pub mod error;
pub mod importer;
pub mod normalize;
pub mod redaction;
pub mod sink;
pub mod validate;

pub use config::{
    DEFAULT_ISSUE_LIMIT, DEFAULT_KEY_FIELD, DEFAULT_SOURCE_PATH, DuplicatePolicy, ImporterConfig,
};
pub use error::{ImportError, Result};
pub use importer::{Importer, RowOutcome, run};
pub use normalize::normalize;
pub use redaction::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data_enabled};
pub use sink::{DiscardSink, ItemSink, MemorySink};
pub use validate::validate;
