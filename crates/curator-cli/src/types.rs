use std::path::PathBuf;

use curator_model::ImportSummary;

#[derive(Debug)]
pub struct ImportReport {
    pub source: PathBuf,
    /// Table name, output file, or "dry run".
    pub target: String,
    pub summary: ImportSummary,
    pub max_issues: usize,
}
