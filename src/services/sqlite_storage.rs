//! SQLite snapshot storage.
//!
//! Single-row key-value table for hosts that want the snapshot in an embedded
//! database instead of a flat file.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::Result;

use super::storage::{SnapshotStorage, STORAGE_NAME};

/// SQLite-backed snapshot storage.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) a snapshot database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        info!("SQLite snapshot storage initialized");
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        debug!("In-memory SQLite snapshot storage initialized");
        Ok(storage)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshots (
                name TEXT PRIMARY KEY,
                data BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl SnapshotStorage for SqliteStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT data FROM snapshots WHERE name = ?1",
                params![STORAGE_NAME],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(row)
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO snapshots (name, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at",
            params![
                STORAGE_NAME,
                bytes,
                chrono::Utc::now().timestamp_millis()
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_storage_round_trip() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        assert_eq!(storage.load().unwrap(), None);
        storage.save(b"snapshot").unwrap();
        assert_eq!(storage.load().unwrap(), Some(b"snapshot".to_vec()));
    }

    #[test]
    fn test_sqlite_storage_save_upserts() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        storage.save(b"first").unwrap();
        storage.save(b"second").unwrap();
        assert_eq!(storage.load().unwrap(), Some(b"second".to_vec()));
    }
}
