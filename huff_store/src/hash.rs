//! Content hashing for dedup keys and integrity checks.

use sha2::{Digest, Sha256};

/// Digest provider.
///
/// Must be deterministic: the same bytes always yield the same digest.
/// The digest is used three ways, always over the same representation
/// (the artifact bytes): dedup key before transfer, integrity check
/// after retrieval, and local cache key.
pub trait Hasher: Send + Sync {
    /// Lowercase hex digest of `bytes`.
    fn digest(&self, bytes: &[u8]) -> String;
}

/// SHA-256 hasher. The 64-char hex digest doubles as a cache filename.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn digest(&self, bytes: &[u8]) -> String {
        let digest = Sha256::digest(bytes);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        // SHA-256 of "abc", a fixed test vector.
        assert_eq!(
            Sha256Hasher.digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn deterministic() {
        let h = Sha256Hasher;
        assert_eq!(h.digest(b"payload"), h.digest(b"payload"));
        assert_ne!(h.digest(b"payload"), h.digest(b"payload2"));
    }
}
