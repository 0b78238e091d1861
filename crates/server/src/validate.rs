//! Input contract checks for prediction requests.

use crop_core::{ModelKind, FEATURE_COUNT};
use thiserror::Error;

/// Rejections surfaced to the caller as 400 with the message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Incorrect number of features. Got {got} but expected 7")]
    FeatureCount { got: usize },

    #[error(
        "Incorrect model or no model specified, options are: \
         (StandardModel, SimpleModel, DeepModel, SuperDeepModel)"
    )]
    UnknownModel,
}

/// Enforce the input contract: exactly [`FEATURE_COUNT`] features and a
/// recognized model token. Checked in that order.
pub fn validate(features: &[f32], model: &str) -> Result<ModelKind, ValidationError> {
    if features.len() != FEATURE_COUNT {
        return Err(ValidationError::FeatureCount {
            got: features.len(),
        });
    }
    ModelKind::parse(model).ok_or(ValidationError::UnknownModel)
}
