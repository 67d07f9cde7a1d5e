//! Snapshot storage abstraction.
//!
//! The index persists itself as a handful of named blobs written together.
//! [`Storage`] is the pluggable backend interface; [`memory::MemoryStorage`]
//! keeps blobs in a map for tests and ephemeral use, while
//! [`file::FileStorage`] writes one file per blob under a cache directory.

use std::fmt::Debug;

use crate::error::Result;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A backend that can store and retrieve named blobs.
///
/// A blob that has never been written must be reported through
/// [`XystonError::NotFound`](crate::error::XystonError::NotFound) so callers
/// can distinguish "no snapshot yet" from a broken store.
pub trait Storage: Send + Sync + Debug {
    /// Read the contents of a blob.
    fn read_blob(&self, name: &str) -> Result<Vec<u8>>;

    /// Write a blob, replacing any previous contents.
    fn write_blob(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Check whether a blob exists.
    fn blob_exists(&self, name: &str) -> bool;

    /// Delete a blob. Deleting a missing blob is not an error.
    fn delete_blob(&self, name: &str) -> Result<()>;

    /// List the names of all stored blobs.
    fn list_blobs(&self) -> Result<Vec<String>>;
}
