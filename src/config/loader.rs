//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.userdash.toml` in the working directory
//! 4. `~/.config/userdash/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ENV_BASE_URL, ENV_PERSIST, ENV_STATE_DIR, ENV_TIMEOUT,
};
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

/// Remote directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; `/users` is appended.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Local persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Whether state is written to disk at all.
    pub enabled: bool,
    /// Directory holding `state.json`. Defaults to `~/.config/userdash/`.
    pub dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

/// One config file as written. Only keys present in the file are `Some`,
/// so any file layer can set a value back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFile,
    storage: StorageFile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StorageFile {
    enabled: Option<bool>,
    dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, the local `.userdash.toml` in `work_dir`,
    /// then applies environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        if let Some(dir) = work_dir {
            let local_path = dir.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Apply the keys set in a config file on top of this config.
    fn merge(&mut self, file: ConfigFile) {
        if let Some(base_url) = file.api.base_url {
            self.api.base_url = base_url;
        }
        if let Some(secs) = file.api.timeout_secs {
            self.api.timeout_secs = secs;
        }
        if let Some(enabled) = file.storage.enabled {
            self.storage.enabled = enabled;
        }
        if file.storage.dir.is_some() {
            self.storage.dir = file.storage.dir;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(ENV_BASE_URL) {
            self.api.base_url = val;
        }
        if let Some(val) = env.non_empty(ENV_TIMEOUT) {
            match val.trim().parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!("ignoring invalid {ENV_TIMEOUT} value: {val}"),
            }
        }
        if let Some(val) = env.non_empty(ENV_STATE_DIR) {
            self.storage.dir = Some(PathBuf::from(val));
        }
        if let Some(val) = env.non_empty(ENV_PERSIST) {
            match val.to_lowercase().as_str() {
                "false" | "0" | "no" | "off" => self.storage.enabled = false,
                "true" | "1" | "yes" | "on" => self.storage.enabled = true,
                _ => warn!("ignoring invalid {ENV_PERSIST} value: {val}"),
            }
        }
    }

    /// Resolved state directory, if persistence has anywhere to write.
    pub fn state_dir(&self) -> Option<PathBuf> {
        self.storage
            .dir
            .clone()
            .or_else(crate::store::FileStore::default_dir)
    }
}
