//! Pluggable backend trait and error types for probability models

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during backend operations
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Model loading failed: {0}")]
    LoadError(String),
    #[error("Inference failed: {0}")]
    InferenceError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// A model that maps a feature vector to a probability distribution
///
/// Implementations are shared read-only across request handlers, so they must
/// not rely on interior mutability for inference.
pub trait ProbabilityModel: Send + Sync {
    /// Predict one probability per output class for a single feature vector
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, BackendError>;

    /// Number of features the model expects
    fn input_dim(&self) -> usize;

    /// Number of probabilities the model produces
    fn output_dim(&self) -> usize;

    /// Get backend name/identifier
    fn backend_name(&self) -> &str;
}

pub(crate) fn check_input_len(expected: usize, features: &[f64]) -> Result<(), BackendError> {
    if features.len() != expected {
        return Err(BackendError::InvalidInput(format!(
            "Expected {expected} features, got {}",
            features.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_length_mismatch_is_invalid_input() {
        let err = check_input_len(3, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, BackendError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: Expected 3 features, got 2");
    }

    #[test]
    fn input_length_match_is_ok() {
        assert!(check_input_len(2, &[0.0, 0.0]).is_ok());
    }
}
