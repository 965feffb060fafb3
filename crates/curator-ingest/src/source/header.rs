//! Header inspection: which columns become item attributes.

use std::collections::HashMap;
use std::fmt;

/// What happens to a source column when rows are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStatus {
    /// Becomes the required key attribute.
    Key,
    /// Becomes a regular attribute.
    Kept,
    /// Name is empty after trimming; its cells are never written.
    DroppedEmpty,
    /// A later column trims to the same name and replaces this one.
    Shadowed { by: usize },
}

impl fmt::Display for ColumnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Kept => write!(f, "kept"),
            Self::DroppedEmpty => write!(f, "dropped (empty)"),
            Self::Shadowed { by } => write!(f, "shadowed by column {by}"),
        }
    }
}

/// One header column and its fate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderColumn {
    /// 1-based column position.
    pub position: usize,
    /// Header text as written in the file.
    pub raw: String,
    /// Trimmed attribute name, `None` when empty.
    pub attribute: Option<String>,
    pub status: ColumnStatus,
}

/// Classifies each header the way row normalization will treat it.
pub fn inspect_headers(headers: &[String], key_field: &str) -> Vec<HeaderColumn> {
    let mut last_position: HashMap<&str, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        let name = header.trim();
        if !name.is_empty() {
            last_position.insert(name, idx + 1);
        }
    }

    headers
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let position = idx + 1;
            let name = raw.trim();
            let status = if name.is_empty() {
                ColumnStatus::DroppedEmpty
            } else {
                match last_position.get(name) {
                    Some(&winner) if winner != position => ColumnStatus::Shadowed { by: winner },
                    _ if name == key_field => ColumnStatus::Key,
                    _ => ColumnStatus::Kept,
                }
            };
            HeaderColumn {
                position,
                raw: raw.clone(),
                attribute: (!name.is_empty()).then(|| name.to_string()),
                status,
            }
        })
        .collect()
}
