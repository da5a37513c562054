//! Ordered symptom vocabulary defining the feature vector layout

use std::collections::HashMap;

use crate::error::TableError;
use crate::normalize::normalize;

/// Ordered, distinct symptom keys; position is the feature index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary, normalizing every entry.
    ///
    /// Entries that normalize to the same key, or to nothing, are rejected.
    pub fn new<I, S>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys = Vec::new();
        let mut index = HashMap::new();
        for entry in entries {
            let key = normalize(entry.as_ref());
            if key.is_empty() {
                return Err(TableError::EmptyKey(entry.as_ref().to_string()));
            }
            if index.contains_key(&key) {
                return Err(TableError::DuplicateKey(key));
            }
            index.insert(key.clone(), keys.len());
            keys.push(key);
        }
        Ok(Self { keys, index })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Feature index of an already-normalized key
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
