//! Local content-addressed cache of decoded files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

/// Disk cache keyed by ContentHash.
///
/// Values are the fully decoded bytes, so a warm request is served with
/// no remote fetch and no decode. The cache is unbounded and never
/// evicts.
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    /// Open (creating if needed) the cache directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    pub fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        debug!(key, "cache read");
        Ok(fs::read(self.path_for(key))?)
    }

    pub fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        debug!(key, len = bytes.len(), "cache write");
        Ok(fs::write(self.path_for(key), bytes)?)
    }
}
