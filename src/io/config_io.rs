use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;
use crate::model::item::OwnerId;

/// Error type for loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no owner id configured: set server.owner_id in {path} or pass --owner")]
    MissingOwner { path: PathBuf },
}

/// Resolve the config file location: explicit path, then `$TEND_CONFIG`,
/// then `$XDG_CONFIG_HOME/tend/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("TEND_CONFIG")
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    xdg_dir("XDG_CONFIG_HOME", ".config").join("config.toml")
}

/// Directory for the TUI log file, respecting XDG_STATE_HOME
pub fn state_dir() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    let base = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(home_fallback));
    base.join("tend")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config file. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), base_url = %config.server.base_url, "config loaded");
    Ok(config)
}

/// The owner id every request is scoped to. Zero counts as unset.
pub fn require_owner(config: &Config, path: &Path) -> Result<OwnerId, ConfigError> {
    match config.server.owner_id {
        Some(owner) if owner.0 != 0 => Ok(owner),
        _ => Err(ConfigError::MissingOwner {
            path: path.to_path_buf(),
        }),
    }
}
