//! Probability model backends for the Medi symptom checker
//!
//! Provides the backend trait used by the checker, the label encoder that maps
//! output indices to disease labels, and a pure-Rust multilayer-perceptron
//! pipeline loaded from an exported JSON artifact.

pub mod backend;
pub mod labels;
pub mod mlp;

pub use backend::{BackendError, ProbabilityModel};
pub use labels::LabelSet;
pub use mlp::{Activation, DenseLayer, MlpPipeline, StandardScaler};
