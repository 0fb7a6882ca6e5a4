//! Configuration management for mudview.
//!
//! Loads configuration from ${MUDVIEW_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::protocol::Framing;
use crate::style::ColorSpec;
use crate::view::{DEFAULT_EMPHASIS_COLOR, Labels, RenderSettings};

pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:8080/ws";

/// Returns the embedded default config template.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for mudview configuration and data directories.
    //!
    //! MUDVIEW_HOME resolution order:
    //! 1. MUDVIEW_HOME environment variable (if set)
    //! 2. ~/.config/mudview (default)
    //! 3. ./.mudview when no home directory can be determined

    use std::path::PathBuf;

    pub fn mudview_home() -> PathBuf {
        if let Ok(home) = std::env::var("MUDVIEW_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".mudview"),
            |h| h.join(".config").join("mudview"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        mudview_home().join("config.toml")
    }

    /// Directory for rolling log files.
    pub fn logs_dir() -> PathBuf {
        mudview_home().join("logs")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WebSocket endpoint of the MUD server.
    pub server_url: String,
    /// How commands are framed on the wire.
    pub framing: Framing,
    /// Log filter used when RUST_LOG is unset.
    pub log_level: String,
    /// Color for a creature's health status line.
    pub emphasis_color: ColorSpec,
    pub labels: Labels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            framing: Framing::default(),
            log_level: "info".to_string(),
            emphasis_color: ColorSpec::new(DEFAULT_EMPHASIS_COLOR),
            labels: Labels::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Parses and validates the server URL. Only `ws` and `wss` are accepted.
    pub fn server_url(&self) -> Result<Url> {
        parse_server_url(&self.server_url)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            emphasis: self.emphasis_color.clone(),
            labels: self.labels.clone(),
        }
    }
}

/// Parses a WebSocket URL, rejecting other schemes.
pub fn parse_server_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid server URL '{raw}'"))?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => anyhow::bail!("Unsupported URL scheme '{other}' in '{raw}' (expected ws or wss)"),
    }
}
