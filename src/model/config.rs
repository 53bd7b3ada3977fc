use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::item::OwnerId;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the remote store; `/todos` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Owner whose collection this session reads and writes
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
    /// Request timeout. Absent = transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: default_base_url(),
            owner_id: None,
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long an error banner stays up before clearing itself
    #[serde(default = "default_error_timeout_ms")]
    pub error_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            error_timeout_ms: default_error_timeout_ms(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

impl UiConfig {
    pub fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }
}

fn default_error_timeout_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}
