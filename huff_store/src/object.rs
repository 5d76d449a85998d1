//! Object store collaborator: raw named bytes, nothing more.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

/// Remote object store interface.
///
/// The pipeline only supplies and consumes raw bytes; naming and
/// versioning are the store's concern. Failures propagate unchanged as
/// [`StoreError::Collaborator`] — retries, if any, belong behind this
/// trait.
pub trait ObjectStore: Send + Sync {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError>;
    fn get(&self, name: &str) -> Result<Vec<u8>, StoreError>;
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Directory-backed object store standing in for the remote bucket.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open (creating if needed) the bucket directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::Collaborator(format!("object store at {root:?}: {e}")))?;
        Ok(Self { root })
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        debug!(name, len = bytes.len(), "object put");
        fs::write(self.root.join(name), bytes)
            .map_err(|e| StoreError::Collaborator(format!("put {name}: {e}")))
    }

    fn get(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        debug!(name, "object get");
        fs::read(self.root.join(name))
            .map_err(|e| StoreError::Collaborator(format!("get {name}: {e}")))
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let dir = fs::read_dir(&self.root)
            .map_err(|e| StoreError::Collaborator(format!("list: {e}")))?;
        for entry in dir {
            let entry = entry.map_err(|e| StoreError::Collaborator(format!("list: {e}")))?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
