//! Tracing setup.
//!
//! The terminal UI owns stdout/stderr, so events go to a daily rolling file
//! under `$MUDVIEW_HOME/logs` through a non-blocking writer.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_PREFIX: &str = "mudview.log";

/// Builds the filter: RUST_LOG wins, then `default_level`, then `info`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `log_dir`.
///
/// The returned guard flushes pending events on drop and must be held for
/// the life of the process.
pub fn init(log_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(log_dir = %log_dir.display(), "Logging initialized");
    Ok(guard)
}

/// Installs the global subscriber writing plain lines to stderr.
///
/// For commands that do not take over the terminal, so diagnostics are
/// visible next to their output.
pub fn init_stderr(default_level: &str) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
