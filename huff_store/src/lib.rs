pub mod cache;
pub mod depot;
pub mod error;
pub mod hash;
pub mod meta;
pub mod object;

pub use cache::LocalCache;
pub use depot::{Depot, Retrieved, StoreReceipt};
pub use error::StoreError;
pub use hash::{Hasher, Sha256Hasher};
pub use meta::{FileEntry, JsonMetadataStore, MetadataStore};
pub use object::{FsObjectStore, ObjectStore};
