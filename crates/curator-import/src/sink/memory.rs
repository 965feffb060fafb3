use std::collections::BTreeMap;

use curator_model::{NormalizedItem, WriteError};

use super::ItemSink;

/// In-memory table keyed by one attribute. A put with an existing key
/// replaces the stored item.
#[derive(Debug, Clone)]
pub struct MemorySink {
    key_field: String,
    items: BTreeMap<String, NormalizedItem>,
    writes: usize,
}

impl MemorySink {
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            items: BTreeMap::new(),
            writes: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&NormalizedItem> {
        self.items.get(key)
    }

    /// Stored items in key order.
    pub fn items(&self) -> impl Iterator<Item = &NormalizedItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of accepted puts, including ones that replaced an item.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ItemSink for MemorySink {
    fn target(&self) -> &str {
        "memory"
    }

    fn put_item(&mut self, item: &NormalizedItem) -> Result<(), WriteError> {
        let key = item
            .get(&self.key_field)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                WriteError::Rejected(format!("missing key attribute {}", self.key_field))
            })?;
        self.items.insert(key.to_string(), item.clone());
        self.writes += 1;
        Ok(())
    }
}

/// Accepts and counts every item without storing it.
#[derive(Debug, Clone, Default)]
pub struct DiscardSink {
    accepted: usize,
}

impl DiscardSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }
}

impl ItemSink for DiscardSink {
    fn target(&self) -> &str {
        "dry run"
    }

    fn put_item(&mut self, _item: &NormalizedItem) -> Result<(), WriteError> {
        self.accepted += 1;
        Ok(())
    }
}
