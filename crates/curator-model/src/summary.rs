use serde::{Deserialize, Serialize};

use crate::outcome::{SkipReason, WriteError};

/// Whether a reported row was skipped before writing or failed in the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    Skipped,
    Failed,
}

/// A single skipped or failed row, kept for the end-of-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row: usize,
    pub kind: IssueKind,
    pub reason: String,
}

/// Counters for one import run.
///
/// `skipped + failed + succeeded == seen` holds after every `record_*` call.
/// At most `issue_limit` issues are kept; the rest are only counted in
/// `issues_omitted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub seen: usize,
    pub skipped: usize,
    pub failed: usize,
    pub succeeded: usize,
    /// Rows whose key value repeated an earlier row, whatever happened to them.
    pub duplicate_keys: usize,
    pub issues: Vec<RowIssue>,
    pub issues_omitted: usize,
    #[serde(skip)]
    issue_limit: Option<usize>,
}

impl ImportSummary {
    /// An empty summary that keeps at most `limit` issues.
    pub fn with_issue_limit(limit: usize) -> Self {
        Self {
            issue_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn record_written(&mut self) {
        self.seen += 1;
        self.succeeded += 1;
    }

    pub fn record_skipped(&mut self, row: usize, reason: &SkipReason) {
        self.seen += 1;
        self.skipped += 1;
        if matches!(reason, SkipReason::DuplicateKey { .. }) {
            self.duplicate_keys += 1;
        }
        self.push_issue(row, IssueKind::Skipped, reason);
    }

    pub fn record_failed(&mut self, row: usize, error: &WriteError) {
        self.seen += 1;
        self.failed += 1;
        self.push_issue(row, IssueKind::Failed, error);
    }

    fn push_issue(&mut self, row: usize, kind: IssueKind, reason: &dyn std::fmt::Display) {
        if self
            .issue_limit
            .is_some_and(|limit| self.issues.len() >= limit)
        {
            self.issues_omitted += 1;
            return;
        }
        self.issues.push(RowIssue {
            row,
            kind,
            reason: reason.to_string(),
        });
    }

    /// Counts a key that repeated but was still forwarded to the sink.
    pub fn record_duplicate_forwarded(&mut self) {
        self.duplicate_keys += 1;
    }

    pub fn is_balanced(&self) -> bool {
        self.skipped + self.failed + self.succeeded == self.seen
    }

    pub fn has_issues(&self) -> bool {
        self.skipped > 0 || self.failed > 0
    }

    pub fn skipped_rows(&self) -> impl Iterator<Item = &RowIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Skipped)
    }

    pub fn failed_rows(&self) -> impl Iterator<Item = &RowIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Failed)
    }
}
