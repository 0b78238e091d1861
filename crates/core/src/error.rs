//! Error taxonomy for artifact loading and inference.
//!
//! `ArtifactError` covers startup faults: any of these means the service
//! must refuse to serve traffic. `InferenceError` covers per-request faults
//! on the inference path; the server maps them to a generic 500.

use thiserror::Error;

/// Faults while loading a model or scaler artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("malformed artifact {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("artifact {path} does not fit {model}: {reason}")]
    ShapeMismatch {
        path: String,
        model: String,
        reason: String,
    },

    #[error("scaler artifact {path} rejected: {reason}")]
    InvalidScaler { path: String, reason: String },
}

/// Faults during a single prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("feature vector length {0} does not match the network input")]
    InputShape(usize),

    #[error("model produced a non-finite score for class {0}")]
    NonFiniteOutput(usize),

    #[error("model {0} is not loaded")]
    ModelUnavailable(String),
}
