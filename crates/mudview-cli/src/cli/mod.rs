//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mudview_core::{config, logging};

mod commands;

use commands::replay::ReplayFormat;

#[derive(Parser)]
#[command(name = "mudview")]
#[command(version = "0.1")]
#[command(about = "Terminal client for WebSocket MUD servers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server URL (ws:// or wss://), overrides server_url from config
    #[arg(long, env = "MUDVIEW_URL")]
    url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render a captured session (one payload per line) to stdout
    Replay {
        /// Session file to replay
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReplayFormat::Text)]
        format: ReplayFormat,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, url } = cli;

    // Config commands must not load the file.
    match command {
        None => commands::connect::run(&load_config()?, url.as_deref()).await,
        Some(Commands::Replay { file, format }) => {
            let config = load_config()?;
            logging::init_stderr(&config.log_level)?;
            commands::replay::run(&file, format, &config)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

fn load_config() -> Result<config::Config> {
    config::Config::load().context("load config")
}
