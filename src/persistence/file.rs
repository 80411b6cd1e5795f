//! JSON file snapshot store - one file per storage key

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::persistence::{decode, encode, SnapshotStore, TrackerSnapshot};

/// Keeps the snapshot in `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Option<TrackerSnapshot> {
        match fs::read_to_string(&self.path) {
            Ok(content) => decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read snapshot {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&mut self, snapshot: &TrackerSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write then rename: the stored file is always a whole snapshot
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encode(snapshot)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
