use std::path::{Path, PathBuf};

use crate::io::config_io::{self, ConfigError};
use crate::model::{Config, OwnerId};

/// Resolved configuration for one run
#[derive(Debug)]
pub struct Settings {
    pub path: PathBuf,
    pub config: Config,
    pub owner_id: OwnerId,
}

/// Read the config file and apply command-line overrides on top of it.
pub fn load_settings(
    config: Option<&Path>,
    base_url: Option<&str>,
    owner: Option<u64>,
) -> Result<Settings, ConfigError> {
    let path = config_io::config_path(config);
    let mut config = config_io::read_config(&path)?;
    if let Some(url) = base_url {
        config.server.base_url = url.to_string();
    }
    if let Some(owner) = owner {
        config.server.owner_id = Some(OwnerId(owner));
    }
    let owner_id = config_io::require_owner(&config, &path)?;
    tracing::info!(
        base_url = %config.server.base_url,
        owner = %owner_id,
        "settings resolved"
    );
    Ok(Settings {
        path,
        config,
        owner_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn file_values_are_used() {
        let tmp = TempDir::new().unwrap();
        let path = config_file(
            &tmp,
            "[server]\nbase_url = \"http://todo.test/api\"\nowner_id = 1139\n",
        );
        let settings = load_settings(Some(&path), None, None).unwrap();
        assert_eq!(settings.owner_id, OwnerId(1139));
        assert_eq!(settings.config.server.base_url, "http://todo.test/api");
        assert_eq!(settings.path, path);
    }

    #[test]
    fn flags_override_file() {
        let tmp = TempDir::new().unwrap();
        let path = config_file(
            &tmp,
            "[server]\nbase_url = \"http://todo.test/api\"\nowner_id = 1139\n",
        );
        let settings = load_settings(Some(&path), Some("http://other.test"), Some(5)).unwrap();
        assert_eq!(settings.owner_id, OwnerId(5));
        assert_eq!(settings.config.server.base_url, "http://other.test");
    }

    #[test]
    fn owner_flag_satisfies_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        let settings = load_settings(Some(&path), None, Some(2)).unwrap();
        assert_eq!(settings.owner_id, OwnerId(2));
    }

    #[test]
    fn missing_owner_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        let err = load_settings(Some(&path), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingOwner { .. }));
    }
}
