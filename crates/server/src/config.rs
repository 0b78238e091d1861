//! Server configuration from environment variables with CLI overrides.
//!
//! The credential is deliberately not part of [`ServerConfig`]: it comes
//! from the environment only, is read once at startup, and must never
//! appear in logs or flags.

use std::path::PathBuf;

/// Environment variable holding the API credential.
pub const CREDENTIAL_ENV: &str = "API_KEY";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub model_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Resolve configuration: CLI flag, then environment variable, then
    /// default.
    pub fn from_env_and_args(args: &[String]) -> Self {
        let port = flag_value(args, "--port", Some("-p"))
            .and_then(|value| value.parse().ok())
            .or_else(|| {
                std::env::var("CROP_SERVER_PORT")
                    .ok()
                    .and_then(|value| value.parse().ok())
            })
            .unwrap_or(8000);

        let model_dir = flag_value(args, "--model-dir", Some("-m"))
            .or_else(|| std::env::var("CROP_MODEL_DIR").ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models"));

        let log_dir = flag_value(args, "--log-dir", None)
            .or_else(|| std::env::var("CROP_LOG_DIR").ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            port,
            model_dir,
            log_dir,
        }
    }
}

/// Read the credential from the environment. Empty counts as unset.
pub fn credential_from_env() -> Option<String> {
    std::env::var(CREDENTIAL_ENV)
        .ok()
        .filter(|value| !value.is_empty())
}

fn flag_value(args: &[String], long: &str, short: Option<&str>) -> Option<String> {
    args.iter()
        .position(|arg| arg == long || short.is_some_and(|s| arg == s))
        .and_then(|index| args.get(index + 1))
        .cloned()
}
