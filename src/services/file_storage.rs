//! File-based snapshot storage.
//!
//! Persists the layout snapshot as a single JSON file so application restarts
//! resume the previous layout set.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

use super::storage::{SnapshotStorage, STORAGE_NAME};

/// File-backed snapshot storage rooted at a directory.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at the given directory, creating it if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            if let Err(e) = fs::create_dir_all(&dir) {
                warn!("Failed to create storage directory: {}", e);
            }
        }
        Self {
            path: dir.join(format!("{}.json", STORAGE_NAME)),
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot file at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}
