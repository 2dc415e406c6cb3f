//! Preference Store
//!
//! Key-value booleans that survive restarts. Only the first-run flag
//! lives here today.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

/// Set until the first launch has run its permission check
pub const FIRST_START_KEY: &str = "firstStart";

/// Persisted boolean flags
///
/// Reads come from memory; writes may touch storage.
#[async_trait]
pub trait PreferenceStore: Send {
    fn get_bool(&self, key: &str, default: bool) -> bool;

    async fn set_bool(&mut self, key: &str, value: bool) -> io::Result<()>;
}

/// In-memory store for tests and throwaway runs
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, bool>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values.get(key).copied().unwrap_or(default)
    }

    async fn set_bool(&mut self, key: &str, value: bool) -> io::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// TOML file store, written through on every change
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, bool>,
}

impl FilePreferenceStore {
    /// Open the store at `path`; a missing file is an empty store
    pub async fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let values: BTreeMap<String, bool> = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring unreadable preferences {:?}: {}", path, e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        debug!("Opened preferences {:?} ({} keys)", path, values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = toml::to_string(&self.values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        tokio::fs::write(&self.path, contents).await
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values.get(key).copied().unwrap_or(default)
    }

    async fn set_bool(&mut self, key: &str, value: bool) -> io::Result<()> {
        self.values.insert(key.to_string(), value);
        self.persist().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_defaults() {
        let mut store = MemoryPreferenceStore::new();
        assert!(store.get_bool(FIRST_START_KEY, true));
        store.set_bool(FIRST_START_KEY, false).await.unwrap();
        assert!(!store.get_bool(FIRST_START_KEY, true));
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("prefs.toml");

        let mut store = FilePreferenceStore::open(&path).await.unwrap();
        assert!(store.get_bool(FIRST_START_KEY, true));
        store.set_bool(FIRST_START_KEY, false).await.unwrap();

        let reopened = FilePreferenceStore::open(&path).await.unwrap();
        assert!(!reopened.get_bool(FIRST_START_KEY, true));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "firstStart = \"maybe\"").unwrap();

        let store = FilePreferenceStore::open(&path).await.unwrap();
        assert!(store.get_bool(FIRST_START_KEY, true));
    }
}
