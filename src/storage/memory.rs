//! In-memory storage implementation for testing and caching.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, XystonError};
use crate::storage::Storage;

/// An in-memory storage implementation.
///
/// Useful for tests and for building throwaway indexes without touching the
/// filesystem. Uses `Box<[u8]>` for the finalized blobs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// The blobs stored in memory.
    blobs: Mutex<HashMap<String, Box<[u8]>>>,
}

impl MemoryStorage {
    /// Create a new, empty memory storage.
    pub fn new() -> Self {
        MemoryStorage {
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Get the number of blobs stored.
    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    /// Get the total size of all blobs.
    pub fn total_size(&self) -> u64 {
        let blobs = self.blobs.lock().unwrap();
        blobs.values().map(|data| data.len() as u64).sum()
    }

    /// Clear all blobs from storage.
    pub fn clear(&self) {
        self.blobs.lock().unwrap().clear();
    }
}

impl Storage for MemoryStorage {
    fn read_blob(&self, name: &str) -> Result<Vec<u8>> {
        let blobs = self.blobs.lock().unwrap();
        let data = blobs
            .get(name)
            .ok_or_else(|| XystonError::not_found(format!("blob not found: {name}")))?;
        Ok(data.to_vec())
    }

    fn write_blob(&self, name: &str, data: &[u8]) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap();
        blobs.insert(name.to_string(), data.to_vec().into_boxed_slice());
        Ok(())
    }

    fn blob_exists(&self, name: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(name)
    }

    fn delete_blob(&self, name: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap();
        blobs.remove(name);
        Ok(())
    }

    fn list_blobs(&self) -> Result<Vec<String>> {
        let blobs = self.blobs.lock().unwrap();
        let mut names: Vec<String> = blobs.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_blob() {
        let storage = MemoryStorage::new();
        storage.write_blob("postings", b"hello").unwrap();

        assert!(storage.blob_exists("postings"));
        assert_eq!(storage.read_blob("postings").unwrap(), b"hello");
        assert_eq!(storage.blob_count(), 1);
        assert_eq!(storage.total_size(), 5);
    }

    #[test]
    fn test_read_missing_blob_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.read_blob("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_replaces_previous_contents() {
        let storage = MemoryStorage::new();
        storage.write_blob("a", b"one").unwrap();
        storage.write_blob("a", b"two").unwrap();
        assert_eq!(storage.read_blob("a").unwrap(), b"two");
        assert_eq!(storage.blob_count(), 1);
    }

    #[test]
    fn test_delete_blob() {
        let storage = MemoryStorage::new();
        storage.write_blob("a", b"one").unwrap();
        storage.delete_blob("a").unwrap();
        assert!(!storage.blob_exists("a"));

        // Deleting a missing blob is fine.
        storage.delete_blob("a").unwrap();
    }

    #[test]
    fn test_list_blobs_sorted() {
        let storage = MemoryStorage::new();
        storage.write_blob("b", b"2").unwrap();
        storage.write_blob("a", b"1").unwrap();
        assert_eq!(storage.list_blobs().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        storage.write_blob("a", b"1").unwrap();
        storage.clear();
        assert_eq!(storage.blob_count(), 0);
    }
}
