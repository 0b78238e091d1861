//! Application state and router assembly.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crop_core::ModelRegistry;

use crate::{access_log, auth, predict};

/// Read-only state shared across request tasks. The registry and the
/// credential never change after startup, so no locks are needed.
pub struct AppState {
    pub registry: ModelRegistry,
    pub credential: String,
}

pub type SharedState = Arc<AppState>;

/// Uniform error envelope for every 4xx/5xx response.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Json<Self> {
        Json(Self {
            detail: detail.into(),
        })
    }
}

/// Build the full router: health, the authenticated prediction route, and
/// the access-logging wrapper around both.
pub fn app(state: SharedState) -> Router {
    let predict_routes = Router::new()
        .route("/predict/", post(predict::get_prediction))
        // Auth runs before body deserialization: a bad credential is 403
        // even when the body is garbage.
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(home))
        .merge(predict_routes)
        .layer(middleware::from_fn(access_log::log_requests))
        .with_state(state)
}

/// Liveness only; no dependency checks.
async fn home() -> &'static str {
    "Healthy"
}
