//! Request-scoped access and error logging.
//!
//! Wraps every route, the health check included. Each request gets a
//! pre-handling record (client origin, method, path), a sanitized payload
//! record for JSON bodies, and a post-handling record (status, elapsed
//! seconds). A 5xx outcome additionally emits an error record. Sensitive
//! fields are masked with a visible marker, never dropped silently.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::app::ErrorDetail;
use crate::auth::API_KEY_HEADER;

/// Target for records bound for `access.log`.
pub const ACCESS_TARGET: &str = "access";
/// Target for records bound for `error.log`.
pub const ERROR_TARGET: &str = "error";

/// Marker written in place of a redacted value so log consumers can tell
/// redaction happened.
pub const MASK: &str = "****";

/// Prediction bodies are a few hundred bytes; anything past this is not a
/// legitimate request.
const BODY_LIMIT: usize = 64 * 1024;
const RAW_PREVIEW_LIMIT: usize = 500;

pub async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let client = client_origin(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::info!(target: ACCESS_TARGET, "Request from {client}: {method} {path}");

    let request = match log_payload(request, &client).await {
        Ok(request) => request,
        Err(response) => return response,
    };

    let response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();
    let status = response.status();

    tracing::info!(
        target: ACCESS_TARGET,
        "Response to {client}: {} | Processing time: {elapsed:.4}s",
        status.as_u16()
    );
    if status.is_server_error() {
        tracing::error!(
            target: ERROR_TARGET,
            "Failure for {client} after {elapsed:.4}s: {method} {path} -> {}",
            status.as_u16()
        );
    }

    response
}

/// Buffer and log the body of mutating requests, then hand the request back
/// to the router unchanged.
async fn log_payload(request: Request, client: &str) -> Result<Request, Response> {
    if !matches!(request.method().as_str(), "POST" | "PUT" | "PATCH") {
        return Ok(request);
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return Err((
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorDetail::new("Request body too large"),
            )
                .into_response());
        }
    };

    if !bytes.is_empty() {
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(mut payload) => {
                mask_sensitive(&mut payload);
                tracing::info!(target: ACCESS_TARGET, "Payload from {client}: {payload}");
            }
            Err(_) => {
                let preview: String = String::from_utf8_lossy(&bytes)
                    .chars()
                    .take(RAW_PREVIEW_LIMIT)
                    .collect();
                tracing::info!(target: ACCESS_TARGET, "Raw payload from {client}: {preview}");
            }
        }
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Replace the value of every sensitive field with [`MASK`], recursively.
pub fn mask_sensitive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if is_sensitive_key(key) {
                    *entry = Value::String(MASK.to_string());
                } else {
                    mask_sensitive(entry);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                mask_sensitive(item);
            }
        }
        _ => {}
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key == API_KEY_HEADER || key.contains("password") || key.contains("secret")
}

fn client_origin(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
