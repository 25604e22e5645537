use std::path::PathBuf;

use crate::snapshot::Snapshot;

/// Single-file JSON cache for the contribution snapshot.
///
/// Reads are forgiving: a missing, unreadable, or corrupt file is a cache
/// miss, never an error. Writes are a full overwrite of the previous
/// contents; concurrent requests racing on the file only ever replace
/// equivalent-or-newer data, so no locking is taken.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Option<Snapshot> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "cache miss");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "cache unparseable, treating as miss");
                None
            }
        }
    }

    pub fn store(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let pretty = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, pretty)?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("serialize snapshot :: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("write cache file :: {0}")]
    Io(#[from] std::io::Error),
}
