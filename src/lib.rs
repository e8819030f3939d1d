//! Tessera - dashboard layout engine and persistence store for market analytics UIs
//!
//! Owns the collection of dashboard layouts and their widgets, computes
//! non-overlapping placement on a fixed column×row grid, and persists a
//! snapshot of `{layouts, activeLayoutId, gridConfig}` through a pluggable
//! storage backend after every mutation. Single-threaded and synchronous;
//! consumed in-process by UI code.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::{Config, StorageBackend, StorageConfig};
pub use error::{Result, StoreError};
pub use services::{
    storage_from_config, FileStorage, IdGenerator, LayoutStore, MemoryStorage,
    SequentialIdGenerator, SnapshotStorage, SqliteStorage, StoreEvent, SubscriberId,
    UuidGenerator, STORAGE_NAME,
};
pub use types::*;
