//! Top-K disease ranking

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::disease_info::DiseaseInfo;

/// One ranked disease with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    /// Percentage in `[0, 100]`, one decimal place
    pub probability: f64,
    pub description: String,
    pub precautions: Vec<String>,
}

/// Convert a probability to a percentage rounded to one decimal place
pub fn to_percent(p: f64) -> f64 {
    (p * 1000.0).round() / 10.0
}

/// Select the `k` most probable labels.
///
/// Results are ordered by descending probability; equal probabilities keep
/// label index order. NaN sorts after every real value. Probabilities beyond
/// the label list (or labels beyond the probabilities) are ignored.
pub fn rank(
    probabilities: &[f64],
    labels: &[String],
    info: &DiseaseInfo,
    k: usize,
) -> Vec<Prediction> {
    let n = probabilities.len().min(labels.len());
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| descending(probabilities[a], probabilities[b]).then_with(|| a.cmp(&b)));

    order
        .into_iter()
        .take(k)
        .map(|i| {
            let disease = &labels[i];
            Prediction {
                disease: disease.clone(),
                probability: to_percent(probabilities[i]),
                description: info.description(disease).to_string(),
                precautions: info.precautions(disease).to_vec(),
            }
        })
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    let key = |p: f64| if p.is_nan() { f64::NEG_INFINITY } else { p };
    key(b).total_cmp(&key(a))
}
