//! Snapshot storage abstraction.
//!
//! The store persists its snapshot through this interface so the concrete
//! medium (flat file, embedded database, in-memory fake) is swappable and
//! testable.

use std::fs;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::config::{Config, StorageBackend};
use crate::error::Result;

use super::file_storage::FileStorage;
use super::sqlite_storage::SqliteStorage;

/// Fixed name the snapshot is keyed under, across all backends.
pub const STORAGE_NAME: &str = "dashboard-layout-storage";

/// Durable storage for the serialized store snapshot.
pub trait SnapshotStorage {
    /// Read the previously saved snapshot, if any.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the saved snapshot.
    fn save(&self, bytes: &[u8]) -> Result<()>;
}

/// In-memory storage. Clones share the same underlying slot, so tests can
/// hold a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    bytes: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot currently held, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.bytes.lock().unwrap().clone()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.lock().unwrap().clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        *self.bytes.lock().unwrap() = Some(bytes.to_vec());
        Ok(())
    }
}

/// Build the storage backend selected by the configuration.
pub fn storage_from_config(config: &Config) -> Result<Box<dyn SnapshotStorage>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
        StorageBackend::File => Ok(Box::new(FileStorage::new(&config.storage.dir))),
        StorageBackend::Sqlite => {
            if let Err(e) = fs::create_dir_all(&config.storage.dir) {
                warn!("Failed to create storage directory: {}", e);
            }
            let path = config.storage.dir.join(format!("{}.db", STORAGE_NAME));
            Ok(Box::new(SqliteStorage::open(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        storage.save(b"snapshot").unwrap();
        assert_eq!(storage.load().unwrap(), Some(b"snapshot".to_vec()));
    }

    #[test]
    fn test_memory_storage_clones_share_slot() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.save(b"shared").unwrap();
        assert_eq!(handle.contents(), Some(b"shared".to_vec()));
    }

    #[test]
    fn test_memory_storage_save_overwrites() {
        let storage = MemoryStorage::new();
        storage.save(b"first").unwrap();
        storage.save(b"second").unwrap();
        assert_eq!(storage.load().unwrap(), Some(b"second".to_vec()));
    }
}
