//! Opaque key-value blob storage
//!
//! Everything persisted goes through [`BlobStore`]: a string key mapped to
//! an opaque byte blob. The file-backed implementation keeps one file per
//! key under a data directory, writing through a temp file + rename with an
//! exclusive lock held for the write.
//!
//! Reads are fail-safe: a missing or unreadable blob is reported as absent
//! (with a warning), and callers fall back to their default value rather
//! than surfacing an error.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write blob '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// String-keyed blob persistence
pub trait BlobStore {
    /// Loads the blob for a key, or None if absent or unreadable
    fn load(&self, key: &str) -> Option<Vec<u8>>;

    /// Saves the blob for a key, replacing any previous value
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// File-per-key blob store rooted at a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store at the given directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Returns the platform default data directory
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "starbooks", "starbooks")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns the store's root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("failed to read blob '{}' from {}: {}", key, path.display(), e);
                None
            }
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");

        let write = || -> anyhow::Result<()> {
            {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&temp_path)
                    .with_context(|| {
                        format!("Failed to create temp file: {}", temp_path.display())
                    })?;

                file.lock_exclusive()
                    .context("Failed to acquire write lock")?;

                let mut file = &file;
                file.write_all(bytes)
                    .with_context(|| format!("Failed to write blob '{}'", key))?;
                file.flush().context("Failed to flush blob")?;
            }

            // Atomic rename
            fs::rename(&temp_path, &path).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    path.display()
                )
            })?;

            Ok(())
        };

        write().map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// In-memory blob store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, useful for corrupt-blob tests
    pub fn seed(&self, key: &str, bytes: Vec<u8>) {
        self.blobs.borrow_mut().insert(key.to_string(), bytes);
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.load("readingStats").is_none());

        store.save("readingStats", b"{\"currentStreak\":3}").unwrap();
        assert_eq!(
            store.load("readingStats").unwrap(),
            b"{\"currentStreak\":3}"
        );
    }

    #[test]
    fn file_store_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.save("key", b"one").unwrap();
        store.save("key", b"two").unwrap();
        assert_eq!(store.load("key").unwrap(), b"two");
    }

    #[test]
    fn file_store_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.save("key", b"data").unwrap();
        assert!(!dir.path().join("key.json.tmp").exists());
        assert!(dir.path().join("key.json").exists());
    }

    #[test]
    fn file_store_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();

        store.save("key", b"data").unwrap();
        assert!(nested.join("key.json").exists());
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load("key").is_none());
        store.save("key", b"value").unwrap();
        assert_eq!(store.load("key").unwrap(), b"value");
    }
}
