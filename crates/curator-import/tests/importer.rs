//! End-to-end runs of the importer over temporary CSV files.

use std::io::Write;
use std::path::Path;

use curator_import::{
    DiscardSink, DuplicatePolicy, ImportError, Importer, ImporterConfig, ItemSink, MemorySink, run,
};
use curator_ingest::IngestError;
use curator_model::{IssueKind, NormalizedItem, WriteError};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

fn item(pairs: &[(&str, &str)]) -> NormalizedItem {
    pairs.iter().copied().collect()
}

/// Records every item in arrival order and fails on chosen key values.
#[derive(Default)]
struct RecordingSink {
    items: Vec<NormalizedItem>,
    fail_keys: Vec<String>,
}

impl RecordingSink {
    fn failing_on(keys: &[&str]) -> Self {
        Self {
            items: Vec::new(),
            fail_keys: keys.iter().map(|key| (*key).to_string()).collect(),
        }
    }
}

impl ItemSink for RecordingSink {
    fn target(&self) -> &str {
        "recording"
    }

    fn put_item(&mut self, item: &NormalizedItem) -> Result<(), WriteError> {
        let key = item.get("AssetTag").unwrap_or_default();
        if self.fail_keys.iter().any(|fail| fail == key) {
            return Err(WriteError::Unavailable(format!("throttled writing {key}")));
        }
        self.items.push(item.clone());
        Ok(())
    }
}

#[test]
fn asset_tag_scenario() {
    let file = create_temp_csv(b"AssetTag, Owner\nA1,Bob\n,Carol\n\" A2 \",\" Dave \"\n");
    let mut sink = RecordingSink::default();
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();

    assert_eq!(
        sink.items,
        vec![
            item(&[("AssetTag", "A1"), ("Owner", "Bob")]),
            item(&[("AssetTag", "A2"), ("Owner", "Dave")]),
        ]
    );
    assert_eq!(summary.seen, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.succeeded, 2);

    let skipped: Vec<_> = summary.skipped_rows().collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].row, 2);
    assert_eq!(skipped[0].reason, "missing AssetTag");
}

#[test]
fn empty_header_never_becomes_an_attribute() {
    let file = create_temp_csv(b"AssetTag,,Owner\nA1,junk,Bob\nA2,more junk,Carol\n");
    let mut sink = RecordingSink::default();
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();

    assert_eq!(summary.succeeded, 2);
    for written in &sink.items {
        assert!(written.names().all(|name| !name.is_empty()));
        assert_eq!(written.len(), 2);
    }
}

#[test]
fn one_failing_write_does_not_stop_the_run() {
    let file = create_temp_csv(b"AssetTag,Owner\nA1,Bob\nA2,Carol\nA3,Dave\nA4,Erin\n");
    let mut sink = RecordingSink::failing_on(&["A2"]);
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 3);
    assert!(summary.is_balanced());
    let written: Vec<&str> = sink
        .items
        .iter()
        .filter_map(|item| item.get("AssetTag"))
        .collect();
    assert_eq!(written, vec!["A1", "A3", "A4"]);

    let failed: Vec<_> = summary.failed_rows().collect();
    assert_eq!(failed[0].row, 2);
    assert_eq!(failed[0].kind, IssueKind::Failed);
    assert_eq!(failed[0].reason, "backend unavailable: throttled writing A2");
}

#[test]
fn missing_key_column_skips_every_row() {
    let file = create_temp_csv(b"Serial,Owner\nS1,Bob\nS2,Carol\n");
    let mut sink = MemorySink::new("AssetTag");
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();

    assert_eq!(summary.seen, 2);
    assert_eq!(summary.skipped, 2);
    assert!(sink.is_empty());
}

#[test]
fn malformed_row_is_skipped_and_reading_continues() {
    let file = create_temp_csv(b"AssetTag,Owner\nA1,\xFF\xFE\nA2,Dave\n");
    let mut sink = DiscardSink::new();
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();

    assert_eq!(summary.seen, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.succeeded, 1);
    assert!(summary.issues[0].reason.starts_with("malformed record"));
    assert_eq!(sink.accepted(), 1);
}

#[test]
fn missing_source_is_fatal() {
    let mut sink = DiscardSink::new();
    let result = run(Path::new("/nonexistent/devices.csv"), "AssetTag", &mut sink);

    assert!(matches!(
        result,
        Err(ImportError::Source(IngestError::FileNotFound { .. }))
    ));
    assert_eq!(sink.accepted(), 0);
}

#[test]
fn duplicate_keys_follow_policy() {
    let contents = b"AssetTag,Owner\nA1,Bob\nA1,Carol\nA2,Dave\n";

    let file = create_temp_csv(contents);
    let mut sink = MemorySink::new("AssetTag");
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.duplicate_keys, 1);
    assert_eq!(sink.get("A1").and_then(|item| item.get("Owner")), Some("Carol"));

    let config = ImporterConfig::default()
        .with_source_path(file.path())
        .with_duplicate_policy(DuplicatePolicy::FirstWins);
    let mut sink = MemorySink::new("AssetTag");
    let summary = Importer::new(config).unwrap().run(&mut sink).unwrap();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.duplicate_keys, 1);
    assert_eq!(sink.get("A1").and_then(|item| item.get("Owner")), Some("Bob"));
}

#[test]
fn header_only_source_imports_nothing() {
    let file = create_temp_csv(b"AssetTag,Owner\n");
    let mut sink = DiscardSink::new();
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();
    assert_eq!(summary.seen, 0);
    assert!(!summary.has_issues());
}

#[test]
fn boxed_sinks_are_accepted() {
    let file = create_temp_csv(b"AssetTag\nA1\n");
    let mut sink: Box<dyn ItemSink> = Box::new(DiscardSink::new());
    let summary = run(file.path(), "AssetTag", &mut sink).unwrap();
    assert_eq!(summary.succeeded, 1);
}

#[test]
fn issue_limit_keeps_first_issues_only() {
    let mut content = String::from("AssetTag,Owner\n");
    for owner in 1..=10 {
        content.push_str(&format!(",owner{owner}\n"));
    }
    content.push_str("A1,Bob\n");
    let file = create_temp_csv(content.as_bytes());
    let config = ImporterConfig::default()
        .with_source_path(file.path())
        .with_issue_limit(3);
    let mut sink = MemorySink::new("AssetTag");
    let summary = Importer::new(config).unwrap().run(&mut sink).unwrap();

    assert_eq!(summary.seen, 11);
    assert_eq!(summary.skipped, 10);
    assert_eq!(summary.succeeded, 1);
    let rows: Vec<usize> = summary.issues.iter().map(|issue| issue.row).collect();
    assert_eq!(rows, vec![1, 2, 3]);
    assert_eq!(summary.issues_omitted, 7);
}
