//! Logging setup for the `pinkfit` binary
//!
//! Command mode logs to stderr. The TUI owns the terminal, so it logs to
//! `pinkfit.log` in the data directory instead.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_NAME: &str = "pinkfit.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_stderr() {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter())
        .init();
}

/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init_file(dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .init();

    tracing::debug!(log_dir = %dir.display(), "Logging initialized");
    guard
}
