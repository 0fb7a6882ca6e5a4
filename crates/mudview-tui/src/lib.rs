//! Full-screen terminal client for mudview.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use features::{input, log, statusline};
use mudview_core::config::Config;
pub use runtime::TuiRuntime;
use url::Url;

/// Connects to `url` and runs the interactive client until the user quits.
pub async fn run_interactive(config: &Config, url: Url) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `mudview replay <FILE>` to render a captured session instead."
        );
    }

    let mut err = stderr();
    writeln!(err, "Connecting to {url}")?;
    err.flush()?;

    let mut runtime = TuiRuntime::new(config, url)?;

    let config_path = mudview_core::config::paths::config_path();
    if config_path.exists() {
        runtime
            .state
            .push_system_line(&format!("Config file: {}", config_path.display()));
    }

    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
