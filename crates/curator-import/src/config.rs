//! Configuration for an import run.

use std::path::PathBuf;

use crate::error::{ImportError, Result};

/// Source file read when none is configured.
pub const DEFAULT_SOURCE_PATH: &str = "devices.csv";

/// Column that identifies a device in the inventory table.
pub const DEFAULT_KEY_FIELD: &str = "AssetTag";

/// Skipped and failed rows kept for the end-of-run report.
pub const DEFAULT_ISSUE_LIMIT: usize = 1000;

/// What to do with a row whose key value was already written by an earlier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Write it anyway and let the sink decide (a key-value table replaces
    /// the earlier item). A warning names both rows.
    #[default]
    Overwrite,
    /// Keep the first row and skip later ones.
    FirstWins,
}

/// Options controlling one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImporterConfig {
    /// CSV file to read. Default: `devices.csv`.
    pub source_path: PathBuf,

    /// Column that must be present and non-empty for a row to be written.
    /// Default: `AssetTag`.
    pub key_field: String,

    /// Handling of repeated key values. Default: [`DuplicatePolicy::Overwrite`].
    pub duplicate_policy: DuplicatePolicy,

    /// Issues kept in the summary; later ones are only counted.
    /// Default: 1000.
    pub issue_limit: usize,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            key_field: DEFAULT_KEY_FIELD.to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            issue_limit: DEFAULT_ISSUE_LIMIT,
        }
    }
}

impl ImporterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Sets the key column. Surrounding whitespace is ignored, matching how
    /// header names are normalized.
    pub fn with_key_field(mut self, field: impl AsRef<str>) -> Self {
        self.key_field = field.as_ref().trim().to_string();
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_issue_limit(mut self, limit: usize) -> Self {
        self.issue_limit = limit;
        self
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.key_field.trim().is_empty() {
            return Err(ImportError::InvalidConfig(
                "key field must not be empty".to_string(),
            ));
        }
        if self.source_path.as_os_str().is_empty() {
            return Err(ImportError::InvalidConfig(
                "source path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_device_export() {
        let config = ImporterConfig::default();
        assert_eq!(config.source_path, PathBuf::from("devices.csv"));
        assert_eq!(config.key_field, "AssetTag");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Overwrite);
        assert_eq!(config.issue_limit, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn key_field_is_trimmed() {
        let config = ImporterConfig::new().with_key_field("  SerialNumber ");
        assert_eq!(config.key_field, "SerialNumber");
    }

    #[test]
    fn blank_key_field_is_rejected() {
        let config = ImporterConfig::new().with_key_field("   ");
        assert!(matches!(
            config.validate(),
            Err(ImportError::InvalidConfig(_))
        ));
    }
}
