//! Logging setup for the prediction service.
//!
//! Access and error records go to separate rolling files, selected by
//! tracing target; everything also reaches stderr for operator visibility.
//! The returned guards must be held for the lifetime of the process so the
//! non-blocking writers flush on shutdown.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter, fmt, prelude::*, EnvFilter};

use crate::access_log::{ACCESS_TARGET, ERROR_TARGET};

pub fn init_logging(log_dir: &Path) -> Vec<WorkerGuard> {
    std::fs::create_dir_all(log_dir).ok();

    let access_appender = tracing_appender::rolling::daily(log_dir, "access.log");
    let (access_writer, access_guard) = tracing_appender::non_blocking(access_appender);

    let error_appender = tracing_appender::rolling::daily(log_dir, "error.log");
    let (error_writer, error_guard) = tracing_appender::non_blocking(error_appender);

    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(access_writer)
                .with_ansi(false)
                .with_filter(filter::filter_fn(|meta| meta.target() == ACCESS_TARGET)),
        )
        .with(
            fmt::layer()
                .with_writer(error_writer)
                .with_ansi(false)
                .with_filter(filter::filter_fn(|meta| meta.target() == ERROR_TARGET)),
        )
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_filter(stderr_filter),
        )
        .init();

    vec![access_guard, error_guard]
}
