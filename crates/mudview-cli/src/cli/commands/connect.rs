//! Interactive client command.

use anyhow::{Context, Result};
use mudview_core::{config, logging};
use tracing::info;

/// Connects to the configured server (or `url_override`) in the terminal UI.
pub async fn run(config: &config::Config, url_override: Option<&str>) -> Result<()> {
    let url = match url_override {
        Some(raw) => config::parse_server_url(raw)?,
        None => config
            .server_url()
            .context("server_url in config is not usable")?,
    };

    let _log_guard = logging::init(&config::paths::logs_dir(), &config.log_level)?;
    info!(%url, framing = ?config.framing, "Starting interactive client");

    run_ui(config, url).await
}

#[cfg(feature = "tui")]
async fn run_ui(config: &config::Config, url: url::Url) -> Result<()> {
    mudview_tui::run_interactive(config, url)
        .await
        .context("interactive client failed")
}

#[cfg(not(feature = "tui"))]
async fn run_ui(_config: &config::Config, _url: url::Url) -> Result<()> {
    anyhow::bail!(
        "This build has no terminal UI (feature `tui` disabled).\n\
         Use `mudview replay <FILE>` instead."
    )
}
