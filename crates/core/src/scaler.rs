//! Feature standardization.
//!
//! Every feature vector passes through the scaler before it reaches a
//! network. Parameters come from a JSON artifact written at training time;
//! a missing or unusable artifact is a startup fault, never a silent skip.

use std::path::Path;

use serde::Deserialize;

use crate::error::ArtifactError;
use crate::features::{Features, FEATURE_COUNT};

/// On-disk shape of `scaler.json`.
#[derive(Debug, Deserialize)]
struct RawScaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

/// Mean/variance standardizer with parameters fixed at load time.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    mean: Features,
    std: Features,
}

impl FeatureScaler {
    /// File name of the scaler artifact inside the model directory.
    pub const ARTIFACT_FILE: &'static str = "scaler.json";

    /// Build a scaler from explicit parameters, applying the same checks
    /// as the artifact loader.
    pub fn new(mean: Features, std: Features) -> Result<Self, ArtifactError> {
        Self::validated(mean, std, "<in-memory>")
    }

    /// Load and validate the scaler artifact.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let display = path.display().to_string();

        let contents = std::fs::read_to_string(path).map_err(|e| ArtifactError::Unreadable {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        let raw: RawScaler =
            serde_json::from_str(&contents).map_err(|e| ArtifactError::Malformed {
                path: display.clone(),
                reason: e.to_string(),
            })?;

        let mean = fixed_width(&raw.mean, "mean", &display)?;
        let std = fixed_width(&raw.std, "std", &display)?;
        Self::validated(mean, std, &display)
    }

    fn validated(mean: Features, std: Features, path: &str) -> Result<Self, ArtifactError> {
        for (i, value) in mean.iter().chain(std.iter()).enumerate() {
            if !value.is_finite() {
                return Err(ArtifactError::InvalidScaler {
                    path: path.to_string(),
                    reason: format!("non-finite parameter at position {}", i % FEATURE_COUNT),
                });
            }
        }
        // A zero or negative std would corrupt every prediction downstream.
        for (i, value) in std.iter().enumerate() {
            if *value <= 0.0 {
                return Err(ArtifactError::InvalidScaler {
                    path: path.to_string(),
                    reason: format!("std[{i}] = {value} must be positive"),
                });
            }
        }
        Ok(Self { mean, std })
    }

    /// Standardize a feature vector: `(x - mean) / std` per slot.
    pub fn transform(&self, features: &Features) -> Features {
        let mut scaled = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (features[i] - self.mean[i]) / self.std[i];
        }
        scaled
    }
}

fn fixed_width(values: &[f32], field: &str, path: &str) -> Result<Features, ArtifactError> {
    values
        .try_into()
        .map_err(|_| ArtifactError::InvalidScaler {
            path: path.to_string(),
            reason: format!(
                "{field} has {} entries, expected {FEATURE_COUNT}",
                values.len()
            ),
        })
}
