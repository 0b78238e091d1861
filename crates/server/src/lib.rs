//! Crop Prediction Server Library
//!
//! Router construction and the request pipeline, exposed for in-process
//! integration tests. The binary in `main.rs` wires configuration, logging,
//! and the model registry around [`app::app`].

pub mod access_log;
pub mod app;
pub mod auth;
pub mod config;
pub mod logging;
pub mod predict;
pub mod validate;

pub use app::{app, AppState, SharedState};
pub use config::ServerConfig;
