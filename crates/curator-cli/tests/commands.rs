//! Runs the `curator-import` binary against temporary CSV files.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn curator(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_curator-import"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CURATOR_KEY_FIELD")
        .output()
        .expect("run curator-import")
}

fn write_source(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("devices.csv");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn dry_run_with_skipped_rows_completes() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "AssetTag,Owner\nA1,Bob\n,Carol\nA2,Dave\n");

    let output = curator(&["import", "--source", &source, "--sink", "dry-run"]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Target: dry run"), "{out}");
    assert!(out.contains("missing AssetTag"), "{out}");
    assert!(
        out.contains("Completed with 1 skipped and 0 failed rows."),
        "{out}"
    );
}

#[test]
fn jsonl_import_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "AssetTag, Owner \n A1 ,Bob\nA2, Carol\n");
    let target = dir.path().join("out/items.jsonl");
    let target_arg = target.display().to_string();

    let output = curator(&[
        "import", "--source", &source, "--sink", "jsonl", "--output", &target_arg,
    ]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("All 2 rows imported."));
    let contents = fs::read_to_string(&target).unwrap();
    assert_eq!(
        contents.lines().collect::<Vec<_>>(),
        vec![
            r#"{"AssetTag":"A1","Owner":"Bob"}"#,
            r#"{"AssetTag":"A2","Owner":"Carol"}"#,
        ]
    );
}

#[cfg(target_os = "linux")]
#[test]
fn failed_writes_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "AssetTag,Owner\nA1,Bob\nA2,Carol\n");

    let output = curator(&[
        "import",
        "--source",
        &source,
        "--sink",
        "jsonl",
        "--output",
        "/dev/full",
    ]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(
        out.contains("Completed with 0 skipped and 2 failed rows."),
        "{out}"
    );
    assert!(out.contains("io error"), "{out}");
}

#[test]
fn missing_source_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("absent.csv").display().to_string();

    let output = curator(&["import", "--source", &source, "--sink", "dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("CSV file not found"));
    assert!(!stdout(&output).contains("Completed"));
}

#[test]
fn max_issues_limits_listed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "AssetTag,Owner\n,a\n,b\n,c\n,d\nA1,Bob\n");

    let output = curator(&[
        "import",
        "--source",
        &source,
        "--sink",
        "dry-run",
        "--max-issues",
        "1",
    ]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("... 3 more not shown"), "{out}");
    assert!(
        out.contains("Completed with 4 skipped and 0 failed rows."),
        "{out}"
    );
}

#[test]
fn columns_warns_when_key_column_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "Serial, Owner ,\nS1,Bob,x\n");

    let output = curator(&["columns", "--source", &source]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Owner"), "{out}");
    assert!(out.contains("dropped (empty)"), "{out}");
    assert!(stderr(&output).contains("no column named \"AssetTag\""));
}

#[test]
fn columns_requires_readable_source() {
    let output = curator(&["columns", "--source", "does/not/exist.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error:"));
}
