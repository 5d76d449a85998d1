//! Error types for the storage layer.

use thiserror::Error;

/// Storage pipeline failures.
///
/// Collaborator failures (object store, metadata store) are propagated
/// unchanged — no retries happen at this layer. An integrity mismatch
/// after retrieval is deliberately NOT a variant here: decoded bytes
/// are still returned and the mismatch is reported as a flag plus a
/// warning (see [`Retrieved`](crate::Retrieved)).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Codec failure while compressing or decompressing.
    #[error("codec error: {0}")]
    Codec(#[from] huff_core::CodecError),

    /// Local filesystem failure (cache reads/writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No metadata entry matched the lookup pattern.
    #[error("no entry matches {pattern:?}")]
    NotFound { pattern: String },

    /// The metadata index could not be read or written.
    #[error("metadata store error: {0}")]
    Metadata(String),

    /// Object store operation failed.
    #[error("collaborator error: {0}")]
    Collaborator(String),
}
