//! Severity weights per symptom key

use std::collections::HashMap;

use crate::error::TableError;
use crate::normalize::normalize;

/// Weight used for symptoms that have no severity entry
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeverityTable {
    weights: HashMap<String, f64>,
}

impl SeverityTable {
    /// Build a table from `(symptom, weight)` pairs. Keys are normalized and a
    /// later entry for the same key replaces an earlier one.
    pub fn new<I, S>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut weights = HashMap::new();
        for (symptom, weight) in entries {
            let key = normalize(symptom.as_ref());
            if key.is_empty() {
                return Err(TableError::EmptyKey(symptom.as_ref().to_string()));
            }
            if !weight.is_finite() || weight <= 0.0 {
                return Err(TableError::InvalidWeight { key, weight });
            }
            if let Some(previous) = weights.insert(key.clone(), weight) {
                log::debug!("severity for {key} redefined: {previous} -> {weight}");
            }
        }
        Ok(Self { weights })
    }

    /// Weight of a normalized key, [`DEFAULT_WEIGHT`] when unlisted
    pub fn weight(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
