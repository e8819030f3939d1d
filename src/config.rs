use std::env;
use std::path::PathBuf;

use crate::types::GridConfig;

/// Snapshot storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Single JSON file under the storage directory.
    File,
    /// Embedded SQLite database under the storage directory.
    Sqlite,
    /// In-memory only; nothing survives the process.
    Memory,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "file" => Some(StorageBackend::File),
            "sqlite" => Some(StorageBackend::Sqlite),
            "memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the snapshot file or database.
    pub dir: PathBuf,
    /// Selected backend.
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".tessera"),
            backend: StorageBackend::File,
        }
    }
}

/// Library configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default grid dimensions for new layouts.
    pub grid: GridConfig,
    /// Snapshot storage configuration.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let columns = env::var("TESSERA_GRID_COLUMNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);
        let rows = env::var("TESSERA_GRID_ROWS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(18);

        let dir = env::var("TESSERA_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".tessera"));
        let backend = env::var("TESSERA_STORAGE_BACKEND")
            .ok()
            .and_then(|v| StorageBackend::from_str(&v))
            .unwrap_or(StorageBackend::File);

        Self {
            grid: GridConfig { columns, rows },
            storage: StorageConfig { dir, backend },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!(StorageBackend::from_str("file"), Some(StorageBackend::File));
        assert_eq!(
            StorageBackend::from_str("sqlite"),
            Some(StorageBackend::Sqlite)
        );
        assert_eq!(
            StorageBackend::from_str("memory"),
            Some(StorageBackend::Memory)
        );
        assert_eq!(StorageBackend::from_str("redis"), None);
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.dir, PathBuf::from(".tessera"));
        assert_eq!(config.backend, StorageBackend::File);
    }

    #[test]
    fn test_config_explicit_values() {
        let config = Config {
            grid: GridConfig {
                columns: 32,
                rows: 20,
            },
            storage: StorageConfig {
                dir: PathBuf::from("/tmp/boards"),
                backend: StorageBackend::Sqlite,
            },
        };
        assert_eq!(config.grid.columns, 32);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }
}
