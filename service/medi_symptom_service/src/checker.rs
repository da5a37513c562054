//! The loaded symptom checker and its request path

use std::path::Path;

use medi_classifier::{BackendError, LabelSet, MlpPipeline, ProbabilityModel};
use medi_symptoms::{
    partition, rank, triage, vectorize, ArtifactError, ArtifactPaths, SymptomTables, Vocabulary,
};
use thiserror::Error;

use crate::request::{CheckResponse, SymptomRequest, MISSING_SYMPTOMS};

/// Errors that reject a single prediction request
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("I don't have information on the provided symptoms in my dataset.")]
    NoKnownSymptoms { unknown: Vec<String> },
    #[error("prediction failed: {0}")]
    Inference(#[from] BackendError),
}

/// Errors assembling a checker from its artifacts
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("pipeline expects {expected} input features but the vocabulary has {actual} symptoms")]
    InputMismatch { expected: usize, actual: usize },
    #[error("pipeline produces {expected} probabilities but the label encoder has {actual} classes")]
    OutputMismatch { expected: usize, actual: usize },
}

/// Immutable tables plus the classifier, shared by every request
pub struct SymptomChecker {
    tables: SymptomTables,
    labels: LabelSet,
    model: Box<dyn ProbabilityModel>,
}

impl std::fmt::Debug for SymptomChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymptomChecker")
            .field("symptoms", &self.tables.vocab.len())
            .field("labels", &self.labels.len())
            .field("backend", &self.model.backend_name())
            .finish()
    }
}

impl SymptomChecker {
    /// Assemble a checker, verifying the model agrees with the tables
    pub fn new(
        tables: SymptomTables,
        labels: LabelSet,
        model: Box<dyn ProbabilityModel>,
    ) -> Result<Self, LoadError> {
        if model.input_dim() != tables.vocab.len() {
            return Err(LoadError::InputMismatch {
                expected: model.input_dim(),
                actual: tables.vocab.len(),
            });
        }
        if model.output_dim() != labels.len() {
            return Err(LoadError::OutputMismatch {
                expected: model.output_dim(),
                actual: labels.len(),
            });
        }
        Ok(Self {
            tables,
            labels,
            model,
        })
    }

    /// Load every artifact under `root` (see [`ArtifactPaths`])
    pub fn load(root: impl AsRef<Path>) -> Result<Self, LoadError> {
        let paths = ArtifactPaths::new(root.as_ref());
        let tables = SymptomTables::load(&paths)?;
        let labels = LabelSet::load(paths.labels())?;
        let model = MlpPipeline::load(paths.pipeline())?;
        Self::new(tables, labels, Box::new(model))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.tables.vocab
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Rank diseases and triage the request's symptoms.
    ///
    /// Fails without calling the model when no symptom is in the vocabulary.
    pub fn check(&self, request: &SymptomRequest) -> Result<CheckResponse, CheckError> {
        if request.symptoms.is_empty() {
            return Err(CheckError::InvalidRequest(MISSING_SYMPTOMS.into()));
        }

        let SymptomTables {
            vocab,
            severity,
            disease_info,
        } = &self.tables;

        let matches = partition(&request.symptoms, vocab);
        if matches.matched.is_empty() {
            log::debug!("no known symptoms in {:?}", request.symptoms);
            return Err(CheckError::NoKnownSymptoms {
                unknown: matches.unknown,
            });
        }

        let features = vectorize(&request.symptoms, vocab, severity);
        let probabilities = self.model.predict_proba(&features)?;
        let results = rank(
            &probabilities,
            self.labels.as_slice(),
            disease_info,
            request.topk,
        );
        let verdict = triage(&matches.matched, vocab, severity);

        log::debug!(
            "matched {} of {} symptoms, top result {:?}, triage {} ({})",
            matches.matched.len(),
            request.symptoms.len(),
            results.first().map(|r| r.disease.as_str()),
            verdict.level,
            verdict.score
        );

        Ok(CheckResponse {
            input_symptoms: request.symptoms.clone(),
            results,
            triage: verdict,
            unknown_symptoms: matches.unknown,
        })
    }
}
