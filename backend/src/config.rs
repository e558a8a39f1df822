//! # Configuration
//!
//! Service configuration loaded from an optional YAML file, then overridden
//! by environment variables.
//!
//! ## YAML Format
//!
//! ```yaml
//! server:
//!   bind_address: "127.0.0.1:3000"
//! storage:
//!   backend: sqlite            # or "memory"
//!   database_url: "sqlite:task_rewards.db"
//! activity:
//!   history_limit: 10
//!   max_history_limit: 100
//! log_filter: "info"
//! cors_allowed_origin: "http://localhost:8080"
//! ```
//!
//! Every key is optional. `TASK_REWARDS_CONFIG` names the file;
//! `TASK_REWARDS_BIND` and `DATABASE_URL` override the matching keys.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_PATH_VAR: &str = "TASK_REWARDS_CONFIG";
pub const BIND_ADDRESS_VAR: &str = "TASK_REWARDS_BIND";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_url: "sqlite:task_rewards.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Entries returned when the client does not ask for a limit
    pub history_limit: u32,
    /// Upper bound on client-requested limits
    pub max_history_limit: u32,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            history_limit: 10,
            max_history_limit: 100,
        }
    }
}

impl ActivityConfig {
    /// Resolve a client-requested limit, clamping to `1..=max_history_limit`
    pub fn resolve_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.history_limit)
            .clamp(1, self.max_history_limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub activity: ActivityConfig,
    pub log_filter: String,
    pub cors_allowed_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            activity: ActivityConfig::default(),
            log_filter: "info".to_string(),
            cors_allowed_origin: None,
        }
    }
}

impl AppConfig {
    /// Load from the file named by `TASK_REWARDS_CONFIG` (defaults when
    /// unset), apply environment overrides and validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable lookup
    pub fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                debug!("{} not set, using default configuration", CONFIG_PATH_VAR);
                Self::default()
            }
        };

        if let Some(bind) = lookup(BIND_ADDRESS_VAR) {
            config.server.bind_address = bind;
        }
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            config.storage.database_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let activity = &self.activity;
        if activity.history_limit == 0 || activity.max_history_limit == 0 {
            return Err(ConfigError::Invalid(
                "activity history limits must be at least 1".to_string(),
            ));
        }
        if activity.history_limit > activity.max_history_limit {
            return Err(ConfigError::Invalid(format!(
                "activity.history_limit ({}) exceeds activity.max_history_limit ({})",
                activity.history_limit, activity.max_history_limit
            )));
        }
        self.bind_address()?;
        Ok(())
    }

    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind_address.parse().map_err(|_| {
            ConfigError::Invalid(format!(
                "server.bind_address is not a socket address: {}",
                self.server.bind_address
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(lookup_from(&[])).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.activity.history_limit, 10);
        assert_eq!(config.bind_address().unwrap().port(), 3000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml("storage:\n  backend: memory\n").unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.database_url, "sqlite:task_rewards.db");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_from_file_with_env_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  bind_address: \"0.0.0.0:8000\"\nactivity:\n  history_limit: 20\ncors_allowed_origin: \"http://localhost:8080\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = AppConfig::load(lookup_from(&[
            (CONFIG_PATH_VAR, path.as_str()),
            (DATABASE_URL_VAR, "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0:8000");
        assert_eq!(config.activity.history_limit, 20);
        assert_eq!(config.storage.database_url, "sqlite::memory:");
        assert_eq!(config.cors_allowed_origin.as_deref(), Some("http://localhost:8080"));

        let overridden = AppConfig::load(lookup_from(&[
            (CONFIG_PATH_VAR, path.as_str()),
            (BIND_ADDRESS_VAR, "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(overridden.server.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AppConfig::load(lookup_from(&[(CONFIG_PATH_VAR, "/nonexistent/config.yaml")]));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "activity: [not, a, mapping").unwrap();
        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validation_rejects_bad_limits() {
        let mut config = AppConfig::default();
        config.activity.history_limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.activity.history_limit = 500;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_limit_clamps() {
        let activity = ActivityConfig::default();
        assert_eq!(activity.resolve_limit(None), 10);
        assert_eq!(activity.resolve_limit(Some(0)), 1);
        assert_eq!(activity.resolve_limit(Some(25)), 25);
        assert_eq!(activity.resolve_limit(Some(10_000)), 100);
    }
}
