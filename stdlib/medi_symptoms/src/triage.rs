//! Three-level triage from summed severity weights

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::normalize::humanize;
use crate::severity::SeverityTable;
use crate::vocab::Vocabulary;

/// Scores at or above this are [`TriageLevel::Red`]
pub const RED_THRESHOLD: f64 = 6.0;
/// Scores at or above this (and below red) are [`TriageLevel::Amber`]
pub const AMBER_THRESHOLD: f64 = 3.0;
/// Maximum number of reasons attached to a verdict
pub const MAX_REASONS: usize = 3;

/// Urgency levels, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriageLevel {
    Green,
    Amber,
    Red,
}

impl TriageLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= RED_THRESHOLD {
            TriageLevel::Red
        } else if score >= AMBER_THRESHOLD {
            TriageLevel::Amber
        } else {
            TriageLevel::Green
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriageLevel::Green => "Green",
            TriageLevel::Amber => "Amber",
            TriageLevel::Red => "Red",
        }
    }

    /// Next-step guidance shown alongside the level
    pub fn advice(self) -> &'static str {
        match self {
            TriageLevel::Green => "Monitor symptoms and follow self-care advice.",
            TriageLevel::Amber => "Book an appointment with a clinician within 24-48 hours.",
            TriageLevel::Red => {
                "Emergency signs present. Go to the ER immediately or call local emergency services."
            }
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageVerdict {
    pub level: TriageLevel,
    /// Highest-severity matched symptoms, rendered for display
    pub reasons: Vec<String>,
    pub score: f64,
}

/// Score the matched symptom keys.
///
/// The score is the sum of severity weights, each key counted once. Reasons
/// are the [`MAX_REASONS`] heaviest keys; equal weights are ordered by
/// vocabulary index, then by position in `matched`.
pub fn triage<S: AsRef<str>>(
    matched: &[S],
    vocab: &Vocabulary,
    severity: &SeverityTable,
) -> TriageVerdict {
    let mut seen = HashSet::new();
    let mut weighted: Vec<(f64, usize, &str)> = Vec::with_capacity(matched.len());
    for key in matched {
        let key = key.as_ref();
        if seen.insert(key) {
            let index = vocab.index_of(key).unwrap_or(usize::MAX);
            weighted.push((severity.weight(key), index, key));
        }
    }

    let score: f64 = weighted.iter().map(|(w, _, _)| w).sum();

    // stable sort keeps input position as the final tie-break
    weighted.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    let reasons = weighted
        .iter()
        .take(MAX_REASONS)
        .map(|(_, _, key)| humanize(key))
        .collect();

    TriageVerdict {
        level: TriageLevel::from_score(score),
        reasons,
        score,
    }
}
