//! Symptom tables and scoring for the Medi symptom checker
//!
//! Free-text symptoms are normalized into symptom keys, turned into a
//! severity-weighted feature vector over a fixed vocabulary, and scored into a
//! three-level triage verdict. Model probabilities are ranked into top-K
//! predictions annotated with disease descriptions and precautions.

pub mod artifacts;
pub mod disease_info;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod severity;
pub mod triage;
pub mod vectorize;
pub mod vocab;

pub use artifacts::{ArtifactPaths, SymptomTables};
pub use disease_info::DiseaseInfo;
pub use error::{ArtifactError, TableError};
pub use normalize::{humanize, normalize};
pub use rank::{rank, to_percent, Prediction};
pub use severity::{SeverityTable, DEFAULT_WEIGHT};
pub use triage::{triage, TriageLevel, TriageVerdict};
pub use vectorize::{partition, vectorize, SymptomMatch};
pub use vocab::Vocabulary;
