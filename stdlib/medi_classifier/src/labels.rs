//! Label encoder: output index to disease label

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use crate::backend::BackendError;

/// Ordered set of class labels, indexed the same way as model outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSet {
    classes: Vec<String>,
}

#[derive(Deserialize)]
struct LabelFile {
    classes: Vec<String>,
}

impl LabelSet {
    /// Build a label set, rejecting empty or duplicate labels
    pub fn new(classes: Vec<String>) -> Result<Self, BackendError> {
        let mut seen = HashSet::with_capacity(classes.len());
        for label in &classes {
            if label.trim().is_empty() {
                return Err(BackendError::LoadError("empty class label".into()));
            }
            if !seen.insert(label.as_str()) {
                return Err(BackendError::LoadError(format!(
                    "duplicate class label: {label}"
                )));
            }
        }
        Ok(Self { classes })
    }

    /// Parse `{"classes": [...]}`
    pub fn from_json(s: &str) -> Result<Self, BackendError> {
        let file: LabelFile = serde_json::from_str(s)?;
        Self::new(file.classes)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();
        let s = read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let labels = Self::from_json(&s)?;
        log::debug!("loaded {} class labels from {}", labels.len(), path.display());
        Ok(labels)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classes_in_order() {
        let labels = LabelSet::from_json(r#"{"classes":["Acne","Allergy","GERD"]}"#).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(0), Some("Acne"));
        assert_eq!(labels.get(2), Some("GERD"));
        assert_eq!(labels.get(3), None);
    }

    #[test]
    fn rejects_duplicates() {
        let err = LabelSet::new(vec!["Acne".into(), "Acne".into()]).unwrap_err();
        assert!(matches!(err, BackendError::LoadError(_)));
    }

    #[test]
    fn rejects_blank_label() {
        assert!(LabelSet::new(vec!["Acne".into(), "  ".into()]).is_err());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = LabelSet::from_json(r#"{"labels":[]}"#).unwrap_err();
        assert!(matches!(err, BackendError::SerializationError(_)));
    }
}
