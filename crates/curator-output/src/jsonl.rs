use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use curator_import::ItemSink;
use curator_model::{NormalizedItem, WriteError};

/// Writes each item as a single JSON object line.
pub struct JsonLinesSink {
    path: PathBuf,
    target: String,
    file: File,
    written: usize,
}

impl JsonLinesSink {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir: {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("create output: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            target: path.display().to_string(),
            file,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Syncs the file to disk and returns how many items were written.
    pub fn finish(self) -> Result<usize> {
        self.file
            .sync_data()
            .with_context(|| format!("sync output: {}", self.path.display()))?;
        Ok(self.written)
    }
}

impl ItemSink for JsonLinesSink {
    fn target(&self) -> &str {
        &self.target
    }

    fn put_item(&mut self, item: &NormalizedItem) -> Result<(), WriteError> {
        let mut line = serde_json::to_vec(item).map_err(|err| WriteError::Io(err.to_string()))?;
        line.push(b'\n');
        // One unbuffered write per line, so a failure belongs to this item.
        self.file.write_all(&line)?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/items.jsonl");
        let mut sink = JsonLinesSink::create(&path).unwrap();

        let first: NormalizedItem = [("AssetTag", "A1"), ("Owner", "Bob")].into_iter().collect();
        let second: NormalizedItem = [("AssetTag", "A2"), ("Location", "")].into_iter().collect();
        sink.put_item(&first).unwrap();
        sink.put_item(&second).unwrap();
        assert_eq!(sink.target(), path.display().to_string());
        assert_eq!(sink.finish().unwrap(), 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"AssetTag":"A1","Owner":"Bob"}"#,
                r#"{"AssetTag":"A2","Location":""}"#,
            ]
        );
    }
}
