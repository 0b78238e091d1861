//! API-key gate for the prediction route.
//!
//! One static process-wide credential, compared byte-for-byte against a
//! fixed request header. Runs as route middleware so no validation or
//! inference work happens for unauthenticated callers.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::{ErrorDetail, SharedState};

/// Header carrying the caller's credential.
pub const API_KEY_HEADER: &str = "access_token";

const FORBIDDEN_DETAIL: &str = "Could not validate API key";

/// Reject the request with 403 unless the `access_token` header matches the
/// configured credential exactly. An absent header never matches.
pub async fn require_api_key(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes() == state.credential.as_bytes())
        .unwrap_or(false);

    if authorized {
        next.run(request).await
    } else {
        (StatusCode::FORBIDDEN, ErrorDetail::new(FORBIDDEN_DETAIL)).into_response()
    }
}
