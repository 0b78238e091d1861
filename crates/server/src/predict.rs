//! `POST /predict/`: the prediction pipeline.
//!
//! Auth has already run as route middleware by the time the handler sees a
//! request. Stages here run strictly in order: validate, scale, infer,
//! respond. Any fault on the inference path collapses into a generic 500;
//! only the validator produces specific 4xx detail.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crop_core::{predict, Features, InferenceError, ModelKind, Prediction};

use crate::app::{ErrorDetail, SharedState};
use crate::validate::validate;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f32>,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_class: String,
    pub model_used: String,
    /// Raw (unscaled) features, echoed back to the caller.
    pub features: Vec<f32>,
    pub confidence: f32,
}

pub async fn get_prediction(
    State(state): State<SharedState>,
    Json(request): Json<PredictRequest>,
) -> Response {
    let kind = match validate(&request.features, &request.model) {
        Ok(kind) => kind,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new(rejection.to_string()),
            )
                .into_response();
        }
    };

    match run_inference(&state, kind, &request.features) {
        Ok(prediction) => (
            StatusCode::OK,
            Json(PredictResponse {
                predicted_class: prediction.label.to_string(),
                model_used: request.model,
                features: request.features,
                confidence: prediction.confidence,
            }),
        )
            .into_response(),
        Err(fault) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorDetail::new(format!("Prediction failed: {fault}")),
        )
            .into_response(),
    }
}

/// Scale then infer against the shared registry. Every error here is an
/// inference-path fault; the handler maps them all to 500.
fn run_inference(
    state: &SharedState,
    kind: ModelKind,
    features: &[f32],
) -> Result<Prediction, InferenceError> {
    let network = state
        .registry
        .resolve(kind)
        .ok_or_else(|| InferenceError::ModelUnavailable(kind.as_str().to_string()))?;

    let features: Features = features
        .try_into()
        .map_err(|_| InferenceError::InputShape(features.len()))?;

    let scaled = state.registry.scaler().transform(&features);
    predict(network, &scaled)
}
