//! crop-server entrypoint.
//!
//! Startup order: config, logging, credential, model registry, router,
//! serve. Any startup fault logs its cause and exits non-zero before the
//! listener binds.

use std::net::SocketAddr;
use std::sync::Arc;

use crop_core::{ModelKind, ModelRegistry};
use crop_server::{app, config, logging, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config_values = ServerConfig::from_env_and_args(&args);

    // Guards must outlive the server so file logs flush on shutdown.
    let _guards = logging::init_logging(&config_values.log_dir);

    let credential = match config::credential_from_env() {
        Some(credential) => credential,
        None => {
            tracing::error!(
                "{} is not set; refusing to start without a credential",
                config::CREDENTIAL_ENV
            );
            std::process::exit(1);
        }
    };

    // Eager load: every variant plus the scaler, or no service at all.
    let registry = match ModelRegistry::load(&config_values.model_dir) {
        Ok(registry) => registry,
        Err(fault) => {
            tracing::error!(
                "Cannot load model artifacts from {:?}: {fault}",
                config_values.model_dir
            );
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Loaded {} model variants and scaler from {:?}",
        ModelKind::ALL.len(),
        config_values.model_dir
    );

    let state = Arc::new(AppState {
        registry,
        credential,
    });

    let addr = format!("0.0.0.0:{}", config_values.port);
    tracing::info!("crop-server listening at http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");
    tracing::info!("Shutting down...");
}
