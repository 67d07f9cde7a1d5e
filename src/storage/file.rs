//! File-based storage implementation.
//!
//! One file per blob under a cache directory, with a `.bin` extension.
//! Writes go through a temporary file followed by a rename so a blob is never
//! observed half-written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, XystonError};
use crate::storage::Storage;

const BLOB_EXTENSION: &str = "bin";

/// A storage backend that keeps each blob in its own file.
#[derive(Debug)]
pub struct FileStorage {
    /// Directory holding the blob files.
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a file storage rooted at `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileStorage { dir })
    }

    /// The directory this storage writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, name: &str) -> Result<PathBuf> {
        // Blob names become file names; keep them flat.
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(XystonError::invalid_argument(format!(
                "invalid blob name: {name:?}"
            )));
        }
        Ok(self.dir.join(format!("{name}.{BLOB_EXTENSION}")))
    }
}

impl Storage for FileStorage {
    fn read_blob(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.blob_path(name)?;
        if !path.is_file() {
            return Err(XystonError::not_found(format!("blob not found: {name}")));
        }
        Ok(fs::read(path)?)
    }

    fn write_blob(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.blob_path(name)?;
        let tmp_path = self.dir.join(format!(".{name}.{BLOB_EXTENSION}.tmp"));
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn blob_exists(&self, name: &str) -> bool {
        self.blob_path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    fn delete_blob(&self, name: &str) -> Result<()> {
        let path = self.blob_path(name)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_blobs(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(BLOB_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
