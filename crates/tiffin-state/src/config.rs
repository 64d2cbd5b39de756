//! # Session Configuration
//!
//! Settings read once when a session starts.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIFFIN_LOG=debug                                                   │
//! │     TIFFIN_STORAGE=memory                                              │
//! │     TIFFIN_STORAGE_PATH=/tmp/local-storage.json                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tiffin/session.toml (Linux)                              │
//! │     ~/Library/Application Support/com.tiffin.app/session.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     file storage in the data directory, log filter "info,tiffin=debug" │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # session.toml
//! log_filter = "info,tiffin_state=debug"
//!
//! [storage]
//! backend = "file"  # file | memory
//! path = "/home/me/.local/share/tiffin/local-storage.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tiffin_storage::StorageConfig;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{StateError, StateResult};

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info,tiffin=debug";

/// File name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "session.toml";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,

    /// Durable storage settings.
    pub storage: StorageConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            storage: StorageConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> StateResult<Self> {
        Self::load_with(config_path, env_lookup)
    }

    fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> StateResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or falls back to defaults if load fails.
    ///
    /// Environment overrides still apply to the fallback.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load_or_default_with(config_path, env_lookup)
    }

    fn load_or_default_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self::load_with(config_path, &lookup).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);

            let mut config = Self::default();
            config.apply_overrides(&lookup);
            if let Err(e) = config.validate() {
                warn!("Ignoring TIFFIN_LOG: {}", e);
                config.log_filter = DEFAULT_LOG_FILTER.to_string();
            }
            config
        })
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> StateResult<Self> {
        toml::from_str(contents).map_err(|e| StateError::Config(e.to_string()))
    }

    fn read_file(path: &Path) -> StateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StateError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StateResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StateError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StateError::Config(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| StateError::Config(e.to_string()))?;
        std::fs::write(&path, contents)
            .map_err(|e| StateError::Config(format!("Cannot write {}: {}", path.display(), e)))?;

        info!(?path, "Session config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StateResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(StateError::Config("log_filter cannot be empty".into()));
        }

        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            StateError::Config(format!("Invalid log_filter '{}': {}", self.log_filter, e))
        })?;

        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(env_lookup);
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(filter) = lookup("TIFFIN_LOG") {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.log_filter = filter;
        }

        self.storage.apply_overrides(&lookup);
    }

    /// Returns the platform config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tiffin", "app")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
