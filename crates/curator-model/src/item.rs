use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A row after trimming and empty-key removal, ready to be written.
///
/// Every attribute is a string. Keys are unique and kept in sorted order so
/// that serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedItem {
    attributes: BTreeMap<String, String>,
}

impl NormalizedItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attribute, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for NormalizedItem
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut item = Self::new();
        for (name, value) in iter {
            item.insert(name, value);
        }
        item
    }
}

impl IntoIterator for NormalizedItem {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.into_iter()
    }
}
