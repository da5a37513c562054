//! Severity-weighted feature vectors

use std::collections::HashSet;

use crate::normalize::normalize;
use crate::severity::SeverityTable;
use crate::vocab::Vocabulary;

/// Raw symptoms split by vocabulary membership
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomMatch {
    /// Normalized keys found in the vocabulary, first occurrence order, no repeats
    pub matched: Vec<String>,
    /// Raw inputs whose key is not in the vocabulary, in input order
    pub unknown: Vec<String>,
}

/// Split raw symptom strings into known keys and unknown originals
pub fn partition<S: AsRef<str>>(symptoms: &[S], vocab: &Vocabulary) -> SymptomMatch {
    let mut seen = HashSet::new();
    let mut result = SymptomMatch::default();
    for raw in symptoms {
        let key = normalize(raw.as_ref());
        if vocab.contains(&key) {
            if seen.insert(key.clone()) {
                result.matched.push(key);
            }
        } else {
            result.unknown.push(raw.as_ref().to_string());
        }
    }
    result
}

/// Build the model input: one slot per vocabulary entry, set to the symptom's
/// severity weight when present, zero otherwise. Unknown symptoms are ignored.
pub fn vectorize<S: AsRef<str>>(
    symptoms: &[S],
    vocab: &Vocabulary,
    severity: &SeverityTable,
) -> Vec<f64> {
    let mut features = vec![0.0; vocab.len()];
    for raw in symptoms {
        let key = normalize(raw.as_ref());
        if let Some(i) = vocab.index_of(&key) {
            features[i] = severity.weight(&key);
        }
    }
    features
}
