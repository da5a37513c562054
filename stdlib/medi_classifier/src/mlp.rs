//! Multilayer-perceptron pipeline: feature scaling followed by dense layers
//!
//! The artifact is the JSON export of a `StandardScaler(with_mean=False)` and a
//! trained MLP classifier. Weights are stored input-major: `weights[i][j]` is
//! the connection from input `i` to output `j`.
//!
//! ```json
//! {
//!   "scaler": {"scale": [1.0, 2.0]},
//!   "activation": "relu",
//!   "layers": [
//!     {"weights": [[0.1, 0.2], [0.3, 0.4]], "biases": [0.0, 0.0]},
//!     {"weights": [[1.0, -1.0], [0.5, 0.5]], "biases": [0.1, -0.1]}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

use crate::backend::{check_input_len, BackendError, ProbabilityModel};

/// Hidden-layer activation function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Identity,
    Logistic,
    Tanh,
    #[default]
    Relu,
}

impl Activation {
    fn apply(self, values: &mut [f64]) {
        match self {
            Activation::Identity => {}
            Activation::Logistic => values.iter_mut().for_each(|v| *v = logistic(*v)),
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
        }
    }
}

/// Per-feature scaling without centering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Identity scaling for `dim` features
    pub fn identity(dim: usize) -> Self {
        Self {
            scale: vec![1.0; dim],
        }
    }

    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(&self.scale)
            // constant features are exported with a zero scale and pass through
            .map(|(x, s)| if *s == 0.0 { *x } else { x / s })
            .collect()
    }
}

/// Fully connected layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    pub fn input_dim(&self) -> usize {
        self.weights.len()
    }

    pub fn output_dim(&self) -> usize {
        self.biases.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.biases.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            // symptom vectors are mostly zeros
            if *x == 0.0 {
                continue;
            }
            for (o, w) in out.iter_mut().zip(row) {
                *o += x * w;
            }
        }
        out
    }
}

/// Scaler + MLP classifier producing class probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpPipeline {
    pub scaler: StandardScaler,
    #[serde(default)]
    pub activation: Activation,
    pub layers: Vec<DenseLayer>,
}

impl MlpPipeline {
    /// Build and validate a pipeline
    pub fn new(
        scaler: StandardScaler,
        activation: Activation,
        layers: Vec<DenseLayer>,
    ) -> Result<Self, BackendError> {
        let pipeline = Self {
            scaler,
            activation,
            layers,
        };
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn from_json(s: &str) -> Result<Self, BackendError> {
        let pipeline: MlpPipeline = serde_json::from_str(s)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();
        let s = read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pipeline = Self::from_json(&s)?;
        log::info!(
            "loaded MLP pipeline from {} ({} inputs, {} layers, {} outputs)",
            path.display(),
            pipeline.input_dim(),
            pipeline.layers.len(),
            pipeline.output_dim()
        );
        Ok(pipeline)
    }

    fn validate(&self) -> Result<(), BackendError> {
        let first = self
            .layers
            .first()
            .ok_or_else(|| BackendError::LoadError("pipeline has no layers".into()))?;
        if self.scaler.scale.len() != first.input_dim() {
            return Err(BackendError::LoadError(format!(
                "scaler has {} features but the first layer expects {}",
                self.scaler.scale.len(),
                first.input_dim()
            )));
        }
        if self.scaler.scale.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(BackendError::LoadError(
                "scaler contains a negative or non-finite scale".into(),
            ));
        }

        let mut expected_inputs = first.input_dim();
        for (n, layer) in self.layers.iter().enumerate() {
            if layer.input_dim() != expected_inputs {
                return Err(BackendError::LoadError(format!(
                    "layer {n} expects {} inputs but the previous layer produces {expected_inputs}",
                    layer.input_dim()
                )));
            }
            if layer.output_dim() == 0 {
                return Err(BackendError::LoadError(format!("layer {n} has no outputs")));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != layer.output_dim()) {
                return Err(BackendError::LoadError(format!(
                    "layer {n} weight row {row} has {} columns, expected {}",
                    layer.weights[row].len(),
                    layer.output_dim()
                )));
            }
            let finite = layer.biases.iter().all(|b| b.is_finite())
                && layer.weights.iter().flatten().all(|w| w.is_finite());
            if !finite {
                return Err(BackendError::LoadError(format!(
                    "layer {n} contains non-finite parameters"
                )));
            }
            expected_inputs = layer.output_dim();
        }
        Ok(())
    }
}

impl ProbabilityModel for MlpPipeline {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, BackendError> {
        check_input_len(self.input_dim(), features)?;

        let mut activations = self.scaler.transform(features);
        let (output_layer, hidden) = self
            .layers
            .split_last()
            .ok_or_else(|| BackendError::InferenceError("pipeline has no layers".into()))?;
        for layer in hidden {
            activations = layer.forward(&activations);
            self.activation.apply(&mut activations);
        }
        let logits = output_layer.forward(&activations);

        let probabilities = if logits.len() == 1 {
            let p = logistic(logits[0]);
            vec![1.0 - p, p]
        } else {
            softmax(&logits)
        };
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(BackendError::InferenceError(
                "model produced non-finite probabilities".into(),
            ));
        }
        Ok(probabilities)
    }

    fn input_dim(&self) -> usize {
        self.scaler.scale.len()
    }

    fn output_dim(&self) -> usize {
        match self.layers.last().map(DenseLayer::output_dim) {
            // single logistic unit expands to two classes
            Some(1) => 2,
            Some(n) => n,
            None => 0,
        }
    }

    fn backend_name(&self) -> &str {
        "mlp"
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
