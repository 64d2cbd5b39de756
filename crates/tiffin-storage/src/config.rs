//! # Storage Configuration
//!
//! Chooses and opens the storage backend.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIFFIN_STORAGE=memory|file                                         │
//! │     TIFFIN_STORAGE_PATH=/path/to/local-storage.json                    │
//! │                                                                         │
//! │  2. [storage] table of the session config file                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     file backend in the platform data directory:                       │
//! │     ~/.local/share/tiffin/local-storage.json (Linux)                   │
//! │     ~/Library/Application Support/com.tiffin.app/... (macOS)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};
use crate::file::FileStorage;
use crate::memory::MemoryStorage;
use crate::DurableStorage;

/// File name of the storage file inside the data directory.
pub const STORAGE_FILE_NAME: &str = "local-storage.json";

// =============================================================================
// Backend
// =============================================================================

/// Which storage implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// JSON file on disk.
    #[default]
    File,
    /// Process memory only; nothing survives a restart.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "disk" => Ok(StorageBackend::File),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(StorageError::Unavailable(format!(
                "Unknown storage backend: '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Storage configuration.
///
/// ## Example
/// ```rust
/// use tiffin_storage::StorageConfig;
///
/// let storage = StorageConfig::in_memory().open().unwrap();
/// storage.set("k", "v").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to open.
    pub backend: StorageBackend,

    /// Storage file path. `None` means the platform data directory.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// File storage at an explicit path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        StorageConfig {
            backend: StorageBackend::File,
            path: Some(path.into()),
        }
    }

    /// Memory-only storage.
    pub fn in_memory() -> Self {
        StorageConfig {
            backend: StorageBackend::Memory,
            path: None,
        }
    }

    /// Returns the default storage file path.
    pub fn default_storage_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tiffin", "app")
            .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
    }

    /// Resolves the file path: explicit path, else the platform default.
    pub fn resolve_path(&self) -> StorageResult<PathBuf> {
        self.path
            .clone()
            .or_else(Self::default_storage_path)
            .ok_or_else(|| {
                StorageError::Unavailable("Could not determine app data directory".into())
            })
    }

    /// Applies `TIFFIN_STORAGE` / `TIFFIN_STORAGE_PATH` overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("TIFFIN_STORAGE") {
            match backend.parse::<StorageBackend>() {
                Ok(parsed) => {
                    debug!(backend = %parsed, "Overriding storage backend from environment");
                    self.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring TIFFIN_STORAGE"),
            }
        }

        if let Some(path) = lookup("TIFFIN_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.path = Some(PathBuf::from(path));
        }
    }

    /// Opens the configured backend.
    pub fn open(&self) -> StorageResult<Arc<dyn DurableStorage>> {
        match self.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Arc::new(MemoryStorage::new()))
            }
            StorageBackend::File => {
                let path = self.resolve_path()?;
                info!(?path, "Using file storage");
                Ok(Arc::new(FileStorage::open(path)?))
            }
        }
    }
}
