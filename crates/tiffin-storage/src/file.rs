//! # File Storage
//!
//! A `DurableStorage` backed by one JSON file.
//!
//! ## File Layout
//! ```json
//! {
//!   "tiffin.location": "{\"address\":\"12 MG Road\",\"city\":\"Pune\",\"area\":\"Camp\"}"
//! }
//! ```
//! Values are opaque strings, exactly as browser local storage holds them.
//!
//! ## Write Path
//! ```text
//! set("k", "v")
//!      │
//!      ▼
//! update in-memory map ──► write <file>.tmp-write ──► rename over <file>
//!                                  │
//!                                  └── on failure: delete the temp file,
//!                                      restore previous value,
//!                                      return StorageError::Io
//! ```
//! The rename keeps the file either fully old or fully new after a crash.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::DurableStorage;

type Entries = BTreeMap<String, String>;

/// JSON-file key-value storage.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStorage {
    /// Opens the storage file, loading its entries.
    ///
    /// - Missing file: starts empty (created on first write)
    /// - Unparsable file: starts empty, logged at `warn`; the file is
    ///   overwritten on the next write
    /// - Unreadable file (permissions, etc.): error
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<Entries>(&contents).unwrap_or_else(|e| {
                warn!(?path, error = %e, "Storage file is corrupt, starting empty");
                Entries::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "Storage file not found, starting empty");
                Entries::new()
            }
            Err(e) => return Err(StorageError::io(&path, e)),
        };

        debug!(?path, keys = entries.len(), "Storage file opened");

        Ok(FileStorage {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("file storage lock poisoned".into()))
    }

    /// Sibling temp file: `<file>.tmp-write`, whatever `<file>`'s extension.
    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp-write");
        PathBuf::from(tmp)
    }

    /// Writes all entries to disk through a temp file + rename.
    fn persist(&self, entries: &Entries) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.tmp_path();

        let written = fs::write(&tmp_path, contents)
            .map_err(|e| StorageError::io(&tmp_path, e))
            .and_then(|()| {
                fs::rename(&tmp_path, &self.path).map_err(|e| StorageError::io(&self.path, e))
            });

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = ?tmp_path, error = %cleanup, "Could not remove temp file");
                }
            }
            return Err(e);
        }

        debug!(path = ?self.path, keys = entries.len(), "Storage file written");
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.lock()?;
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.lock()?;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&entries) {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("local-storage.json")).unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local-storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("a", "1").unwrap();
        storage.set("b", r#"{"x":true}"#).unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some(r#"{"x":true}"#));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("a", "1").unwrap();
        storage.remove("a").unwrap();
        storage.remove("never-set").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.json");
        fs::write(&path, "definitely not json").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("a").unwrap(), None);

        storage.set("a", "1").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_tmp_extension_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.tmp");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("a", "1").unwrap();
        storage.set("a", "2").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("2"));
        assert!(!dir.path().join("store.tmp.tmp-write").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.json");
        let storage = FileStorage::open(&path).unwrap();

        // A non-empty directory where the storage file should be
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "").unwrap();

        let err = storage.set("a", "1").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!storage.tmp_path().exists());
        assert_eq!(storage.get("a").unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("blocker");
        let storage = FileStorage::open(parent.join("local-storage.json")).unwrap();

        // A regular file where the parent directory should be
        fs::write(&parent, "").unwrap();

        let err = storage.set("a", "1").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(storage.get("a").unwrap(), None);
    }
}
