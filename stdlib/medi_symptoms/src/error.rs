use std::path::PathBuf;
use thiserror::Error;

/// Errors building the in-memory symptom tables
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("symptom {0:?} normalizes to an empty key")]
    EmptyKey(String),
    #[error("duplicate vocabulary entry: {0}")]
    DuplicateKey(String),
    #[error("severity weight for {key} must be positive and finite, got {weight}")]
    InvalidWeight { key: String, weight: f64 },
}

/// Errors loading symptom artifacts from disk
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {message}", .path.display())]
    Csv {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid table in {}: {source}", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}
