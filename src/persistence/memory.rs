//! In-memory snapshot store

use ahash::AHashMap;

use crate::core::config::DEFAULT_STORAGE_KEY;
use crate::core::error::Result;
use crate::persistence::{decode, encode, SnapshotStore, TrackerSnapshot};

/// Blob store kept in memory; contents are lost when it is dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    key: String,
    blobs: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            blobs: AHashMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw blob currently stored under the key
    pub fn raw(&self) -> Option<&str> {
        self.blobs.get(&self.key).map(String::as_str)
    }

    /// Store an arbitrary blob under the key, bypassing encoding
    pub fn put_raw(&mut self, blob: impl Into<String>) {
        self.blobs.insert(self.key.clone(), blob.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<TrackerSnapshot> {
        self.raw().and_then(decode)
    }

    fn save(&mut self, snapshot: &TrackerSnapshot) -> Result<()> {
        let blob = encode(snapshot)?;
        self.blobs.insert(self.key.clone(), blob);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.blobs.remove(&self.key);
        Ok(())
    }
}
