use crate::cli::Args;
use crate::decks::CrossfadePolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "fdsify.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tools: ToolsConfig,
    pub player: PlayerConfig,
    pub crossfade: CrossfadeConfig,
    pub logging: LoggingConfig,
}

/// Paths of the external executables
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub xdotool: PathBuf,
    pub dbus_send: PathBuf,
    pub sudo: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            xdotool: PathBuf::from("/usr/bin/xdotool"),
            dbus_send: PathBuf::from("/usr/bin/dbus-send"),
            sudo: PathBuf::from("/usr/bin/sudo"),
        }
    }
}

/// MPRIS endpoint of the player on each deck's session bus
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub destination: String,
    pub object_path: String,
    pub interface: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            destination: "org.mpris.MediaPlayer2.spotify".to_string(),
            object_path: "/org/mpris/MediaPlayer2".to_string(),
            interface: "org.mpris.MediaPlayer2.Player".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossfadeConfig {
    pub policy: CrossfadePolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("fdsify.log"),
        }
    }
}

/// Load and parse the config file
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&contents).context("Failed to parse TOML config")?;
    Ok(config)
}

/// Resolve the effective configuration for this run
///
/// An explicit `--config` must exist. Without one, `fdsify.toml` in the
/// working directory is used if present. Command-line flags win over
/// anything read from a file.
pub fn resolve(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            load_config(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => Config::default(),
    };

    if let Some(xdotool) = &args.xdotool {
        config.tools.xdotool = xdotool.clone();
    }
    if let Some(dbus_send) = &args.dbus_send {
        config.tools.dbus_send = dbus_send.clone();
    }
    if args.sequential {
        config.crossfade.policy = CrossfadePolicy::Sequential;
    }

    Ok(config)
}
