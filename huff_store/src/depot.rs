//! The store/fetch pipeline: compress, dedup, transfer, verify, cache.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::cache::LocalCache;
use crate::error::StoreError;
use crate::hash::{Hasher, Sha256Hasher};
use crate::meta::{FileEntry, JsonMetadataStore, MetadataStore};
use crate::object::{FsObjectStore, ObjectStore};

/// Outcome of a [`Depot::store`] call.
#[derive(Debug)]
pub struct StoreReceipt {
    /// ContentHash of the artifact, the dedup key.
    pub hash: String,
    /// Canonical name the artifact lives under in the object store.
    pub remote_name: String,
    /// True when an identical artifact was already stored and the
    /// transfer was skipped.
    pub deduplicated: bool,
    pub raw_len: usize,
    pub artifact_len: usize,
}

/// Outcome of a [`Depot::fetch`] call.
#[derive(Debug)]
pub struct Retrieved {
    /// The decoded original bytes.
    pub bytes: Vec<u8>,
    pub entry: FileEntry,
    /// True when served from the local cache with no remote fetch.
    pub from_cache: bool,
    /// False when the fetched artifact's hash did not match the
    /// recorded one. The bytes are still returned — trust, but verify.
    pub integrity_ok: bool,
}

/// Content-addressed file depot.
///
/// Owns the three collaborators (object store, metadata index, local
/// cache) plus the hasher, and wires the codec through them. Each call
/// owns its own codec state; calls on separate threads need no
/// coordination beyond whatever the collaborators themselves require.
pub struct Depot<H: Hasher> {
    objects: Box<dyn ObjectStore>,
    metadata: Box<dyn MetadataStore>,
    cache: LocalCache,
    hasher: H,
}

impl Depot<Sha256Hasher> {
    /// Filesystem-backed depot under one data directory:
    /// `objects/` as the bucket, `cache/` for decoded files, and
    /// `index.json` as the metadata index.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        Ok(Self::new(
            Box::new(FsObjectStore::open(data_dir.join("objects"))?),
            Box::new(JsonMetadataStore::open(data_dir.join("index.json"))),
            LocalCache::open(data_dir.join("cache"))?,
            Sha256Hasher,
        ))
    }
}

impl<H: Hasher> Depot<H> {
    pub fn new(
        objects: Box<dyn ObjectStore>,
        metadata: Box<dyn MetadataStore>,
        cache: LocalCache,
        hasher: H,
    ) -> Self {
        Self {
            objects,
            metadata,
            cache,
            hasher,
        }
    }

    /// Compress `raw` and store the artifact, skipping the transfer if
    /// an identical artifact is already recorded.
    ///
    /// The dedup key is the hash of the artifact bytes. Because the
    /// codec's tie-breaks are pinned, re-compressing the same file
    /// yields the same artifact and therefore the same key.
    pub fn store(&self, original_name: &str, raw: &[u8]) -> Result<StoreReceipt, StoreError> {
        let artifact = huff_core::compress(raw)?;
        let hash = self.hasher.digest(&artifact);

        if let Some(existing) = self.metadata.find_by_hash(&hash)? {
            info!(
                hash = %hash,
                existing = %existing.remote_name,
                "identical artifact already stored, skipping transfer"
            );
            return Ok(StoreReceipt {
                hash,
                remote_name: existing.remote_name,
                deduplicated: true,
                raw_len: raw.len(),
                artifact_len: artifact.len(),
            });
        }

        let remote_name = format!("{original_name}.huff");
        self.objects.put(&remote_name, &artifact)?;
        self.metadata.insert(FileEntry {
            hash: hash.clone(),
            remote_name: remote_name.clone(),
            original_name: original_name.to_string(),
            compressed: true,
        })?;
        debug!(hash = %hash, remote = %remote_name, "artifact stored");

        Ok(StoreReceipt {
            hash,
            remote_name,
            deduplicated: false,
            raw_len: raw.len(),
            artifact_len: artifact.len(),
        })
    }

    /// Retrieve the decoded bytes for the first entry matching
    /// `pattern`.
    ///
    /// Cache hit: the decoded bytes come straight from disk. Cache
    /// miss: the artifact is fetched from the object store, its hash is
    /// checked against the recorded one (a mismatch is a warning, not a
    /// failure), it is decoded, and the decoded bytes are cached under
    /// the hash for next time.
    pub fn fetch(&self, pattern: &str) -> Result<Retrieved, StoreError> {
        let entry = self
            .metadata
            .find_by_name(pattern)?
            .ok_or_else(|| StoreError::NotFound {
                pattern: pattern.to_string(),
            })?;

        if self.cache.exists(&entry.hash) {
            debug!(hash = %entry.hash, "serving from local cache");
            let bytes = self.cache.read(&entry.hash)?;
            return Ok(Retrieved {
                bytes,
                entry,
                from_cache: true,
                integrity_ok: true,
            });
        }

        let artifact = self.objects.get(&entry.remote_name)?;
        let actual = self.hasher.digest(&artifact);
        let integrity_ok = actual == entry.hash;
        if !integrity_ok {
            warn!(
                object = %entry.remote_name,
                expected = %entry.hash,
                actual = %actual,
                "hash mismatch on retrieved object"
            );
        }

        let bytes = if entry.compressed {
            huff_core::decompress(&artifact)?
        } else {
            artifact
        };
        self.cache.write(&entry.hash, &bytes)?;

        Ok(Retrieved {
            bytes,
            entry,
            from_cache: false,
            integrity_ok,
        })
    }

    /// Names currently present in the object store.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        self.objects.list()
    }
}
