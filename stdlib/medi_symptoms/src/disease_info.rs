use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptions and precautions keyed by disease label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseaseInfo {
    #[serde(default)]
    pub description: HashMap<String, String>,
    #[serde(default)]
    pub precautions: HashMap<String, Vec<String>>,
}

impl DiseaseInfo {
    /// Description for a label, empty when unknown
    pub fn description(&self, label: &str) -> &str {
        self.description.get(label).map(String::as_str).unwrap_or("")
    }

    /// Precautions for a label, empty when unknown
    pub fn precautions(&self, label: &str) -> &[String] {
        self.precautions
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
