//! The row loop: read, normalize, validate, write.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use curator_ingest::{CsvSource, IngestError};
use curator_model::{ImportSummary, Row, SkipReason, WriteError};
use tracing::{debug, error, info, info_span, trace, warn};

use crate::config::{DuplicatePolicy, ImporterConfig};
use crate::error::Result;
use crate::normalize::normalize;
use crate::redaction::{log_data_enabled, redact_value};
use crate::sink::ItemSink;
use crate::validate::validate;

/// What happened to a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Written to the sink. `duplicate_of` names the earlier row that wrote
    /// the same key, if any.
    Written { duplicate_of: Option<usize> },
    Skipped(SkipReason),
    Failed(WriteError),
}

/// Imports one CSV source into a sink.
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImporterConfig,
}

impl Importer {
    /// Creates an importer after checking the configuration.
    pub fn new(config: ImporterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Reads every row of the source and writes the valid ones to `sink`.
    ///
    /// Skipped and failed rows are logged and counted; the run continues. An
    /// error is returned only when the source cannot be opened or read.
    pub fn run<S: ItemSink + ?Sized>(&self, sink: &mut S) -> Result<ImportSummary> {
        let source_path = &self.config.source_path;
        let key_field = self.config.key_field.as_str();
        let span = info_span!(
            "import",
            source = %source_path.display(),
            key_field = %key_field,
        );
        let _guard = span.enter();

        let mut source = CsvSource::open(source_path)?;
        if !source.headers().is_empty()
            && !source
                .headers()
                .iter()
                .any(|header| header.trim() == key_field)
        {
            warn!(
                key_field = %key_field,
                "source has no {key_field} column; every row will be skipped"
            );
        }

        info!(target_name = %sink.target(), "starting import into {}", sink.target());
        let start = Instant::now();
        let mut summary = ImportSummary::with_issue_limit(self.config.issue_limit);
        let mut first_rows: HashMap<String, usize> = HashMap::new();

        for record in source.rows() {
            let row = match record {
                Ok(row) => row,
                Err(IngestError::MalformedRecord { row, message }) => {
                    let reason = SkipReason::MalformedRecord { message };
                    warn!(row, reason = %reason, "skipped row");
                    summary.record_skipped(row, &reason);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            match self.import_row(&row, sink, &mut first_rows) {
                RowOutcome::Written { duplicate_of } => {
                    if duplicate_of.is_some() {
                        summary.record_duplicate_forwarded();
                    }
                    summary.record_written();
                }
                RowOutcome::Skipped(reason) => {
                    warn!(row = row.number, reason = %reason, "skipped row");
                    summary.record_skipped(row.number, &reason);
                }
                RowOutcome::Failed(err) => {
                    error!(row = row.number, error = %err, "failed to write item");
                    summary.record_failed(row.number, &err);
                }
            }
        }

        info!(
            seen = summary.seen,
            succeeded = summary.succeeded,
            skipped = summary.skipped,
            failed = summary.failed,
            duplicate_keys = summary.duplicate_keys,
            duration_ms = start.elapsed().as_millis(),
            "import complete"
        );
        Ok(summary)
    }

    /// Normalizes, validates, and writes a single row.
    ///
    /// `first_rows` maps key values already written to the row that wrote them.
    pub fn import_row<S: ItemSink + ?Sized>(
        &self,
        row: &Row,
        sink: &mut S,
        first_rows: &mut HashMap<String, usize>,
    ) -> RowOutcome {
        let item = normalize(row);
        let key = match validate(&item, &self.config.key_field) {
            Ok(key) => key,
            Err(reason) => return RowOutcome::Skipped(reason),
        };

        let duplicate_of = first_rows.get(key).copied();
        if let Some(first_row) = duplicate_of {
            match self.config.duplicate_policy {
                DuplicatePolicy::FirstWins => {
                    return RowOutcome::Skipped(SkipReason::DuplicateKey {
                        key: key.to_string(),
                        first_row,
                    });
                }
                DuplicatePolicy::Overwrite => {
                    warn!(
                        row = row.number,
                        first_row,
                        key = %redact_value(key),
                        "duplicate key; later row replaces the earlier item"
                    );
                }
            }
        }

        if log_data_enabled() {
            trace!(row = row.number, item = ?item, "writing item");
        }
        match sink.put_item(&item) {
            Ok(()) => {
                debug!(row = row.number, attributes = item.len(), "item written");
                first_rows.entry(key.to_string()).or_insert(row.number);
                RowOutcome::Written { duplicate_of }
            }
            Err(err) => RowOutcome::Failed(err),
        }
    }
}

/// Imports `source_path` into `sink`, requiring `key_field` on every row.
///
/// Shorthand for an [`Importer`] built from the default configuration.
pub fn run<S: ItemSink + ?Sized>(
    source_path: &Path,
    key_field: &str,
    sink: &mut S,
) -> Result<ImportSummary> {
    let config = ImporterConfig::default()
        .with_source_path(source_path)
        .with_key_field(key_field);
    Importer::new(config)?.run(sink)
}
