//! # tiffin-storage: Durable Storage for Tiffin
//!
//! The key-value store that outlives a session, the way browser local
//! storage does for a web client. Only the delivery location is persisted.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tiffin Data Flow                                 │
//! │                                                                         │
//! │  LocationStore::set_location(loc)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tiffin-storage (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌───────────────┐   ┌───────────────┐  │   │
//! │  │   │ DurableStorage │   │  FileStorage  │   │ MemoryStorage │  │   │
//! │  │   │    (trait)     │◄──│  (file.rs)    │   │ (memory.rs)   │  │   │
//! │  │   │ get/set/remove │◄──┼───────────────┼───│               │  │   │
//! │  │   └────────────────┘   └───────────────┘   └───────────────┘  │   │
//! │  │            ▲                                                    │   │
//! │  │            └── StorageConfig::open() (config.rs)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/tiffin/local-storage.json                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use tiffin_storage::{DurableStorage, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! storage.set("tiffin.location", r#"{"address":"a","city":"b","area":"c"}"#).unwrap();
//! assert!(storage.get("tiffin.location").unwrap().is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{StorageBackend, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;

// =============================================================================
// Storage Trait
// =============================================================================

/// A string key-value store that survives restarts.
///
/// ## Contract
/// - Values are opaque strings; callers own their encoding
/// - `set` overwrites; `remove` of a missing key is `Ok(())`
/// - Calls are synchronous and complete before returning
/// - Implementations are shared across a session through `Arc<dyn DurableStorage>`
pub trait DurableStorage: Send + Sync + std::fmt::Debug {
    /// Reads a value.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes a value.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
