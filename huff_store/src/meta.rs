//! Metadata store collaborator: the hash/name lookup index.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One record in the lookup index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// ContentHash of the stored artifact, lowercase hex.
    pub hash: String,
    /// Name the object is stored under in the object store.
    pub remote_name: String,
    /// The filename the caller supplied at store time.
    pub original_name: String,
    /// Whether `remote_name` refers to a compressed artifact.
    pub compressed: bool,
}

/// Metadata store interface: dedup lookup and retrieval routing only.
pub trait MetadataStore: Send + Sync {
    /// Entry whose artifact hash equals `hash` exactly.
    fn find_by_hash(&self, hash: &str) -> Result<Option<FileEntry>, StoreError>;
    /// First entry whose original or remote name contains `pattern`.
    fn find_by_name(&self, pattern: &str) -> Result<Option<FileEntry>, StoreError>;
    fn insert(&self, entry: FileEntry) -> Result<(), StoreError>;
}

/// JSON-array index file.
///
/// Loaded and rewritten whole per operation; concurrent writers must be
/// serialized by the caller.
pub struct JsonMetadataStore {
    path: PathBuf,
}

impl JsonMetadataStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<Vec<FileEntry>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Metadata(format!("parsing {:?}: {e}", self.path))),
            // A missing index file is an empty index.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Metadata(format!(
                "reading {:?}: {e}",
                self.path
            ))),
        }
    }

    fn save(&self, entries: &[FileEntry]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| StoreError::Metadata(format!("serializing index: {e}")))?;
        fs::write(&self.path, bytes)
            .map_err(|e| StoreError::Metadata(format!("writing {:?}: {e}", self.path)))
    }
}

impl MetadataStore for JsonMetadataStore {
    fn find_by_hash(&self, hash: &str) -> Result<Option<FileEntry>, StoreError> {
        Ok(self.load()?.into_iter().find(|e| e.hash == hash))
    }

    fn find_by_name(&self, pattern: &str) -> Result<Option<FileEntry>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|e| e.original_name.contains(pattern) || e.remote_name.contains(pattern)))
    }

    fn insert(&self, entry: FileEntry) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)
    }
}
