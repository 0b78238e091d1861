//! Crop Prediction Core
//!
//! Everything the HTTP server needs to turn a feature vector into a crop
//! label: the label table, the feature scaler, the feed-forward networks,
//! the model registry, and the inference routine. No async or transport
//! code lives here.

pub mod error;
pub mod features;
pub mod infer;
pub mod labels;
pub mod network;
pub mod registry;
pub mod scaler;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

// Re-export key types for the server and for tests
pub use error::{ArtifactError, InferenceError};
pub use features::{Features, FEATURE_COUNT, FEATURE_NAMES};
pub use infer::{predict, softmax, Prediction};
pub use labels::{label_for, LABELS, NUM_CLASSES, UNKNOWN_LABEL};
pub use network::Network;
pub use registry::{ModelKind, ModelRegistry};
pub use scaler::FeatureScaler;
