//! Integration tests for snapshot persistence and storage backends.

use std::fs;
use std::path::PathBuf;

use tessera::{
    storage_from_config, Config, FileStorage, GridConfig, LayoutMode, LayoutStore, MemoryStorage,
    SequentialIdGenerator, SnapshotStorage, SqliteStorage, StorageBackend, StorageConfig,
    StoreSnapshot, WidgetKind, STORAGE_NAME,
};
use uuid::Uuid;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("tessera-test-{}", Uuid::new_v4()))
}

fn ids() -> Box<SequentialIdGenerator> {
    Box::new(SequentialIdGenerator::new("id"))
}

// =============================================================================
// Snapshot behavior
// =============================================================================

#[test]
fn test_snapshot_written_after_every_mutation() {
    let storage = MemoryStorage::new();
    let mut store = LayoutStore::new(Box::new(storage.clone()), ids());

    assert_eq!(storage.contents(), None);

    let layout_id = store.create_layout("Board", LayoutMode::Light);
    let snapshot: StoreSnapshot =
        serde_json::from_slice(&storage.contents().unwrap()).unwrap();
    assert_eq!(snapshot.layouts.len(), 1);
    assert_eq!(snapshot.active_layout_id, Some(layout_id.clone()));

    store.add_widget(&layout_id, WidgetKind::AlertsFeed, None);
    let snapshot: StoreSnapshot =
        serde_json::from_slice(&storage.contents().unwrap()).unwrap();
    assert_eq!(snapshot.layouts[0].widgets.len(), 5);
}

#[test]
fn test_snapshot_contains_grid_config() {
    let storage = MemoryStorage::new();
    let grid = GridConfig {
        columns: 32,
        rows: 20,
    };
    let mut store = LayoutStore::with_grid(Box::new(storage.clone()), ids(), grid);

    store.create_layout("Wide Board", LayoutMode::Light);

    let snapshot: StoreSnapshot =
        serde_json::from_slice(&storage.contents().unwrap()).unwrap();
    assert_eq!(snapshot.grid_config, grid);
    assert_eq!(snapshot.layouts[0].grid, grid);
}

#[test]
fn test_transient_state_is_not_persisted() {
    let storage = MemoryStorage::new();
    let mut store = LayoutStore::new(Box::new(storage.clone()), ids());

    store.set_edit_mode(true);
    store.select_widget(Some("widget-1"));

    assert_eq!(storage.contents(), None);
}

#[test]
fn test_store_resumes_from_snapshot() {
    let storage = MemoryStorage::new();

    let active_id;
    {
        let mut store = LayoutStore::new(Box::new(storage.clone()), ids());
        store.create_layout("First", LayoutMode::Light);
        active_id = store.create_layout("Second", LayoutMode::Pro);
    }

    let resumed = LayoutStore::new(Box::new(storage.clone()), ids());
    assert_eq!(resumed.layouts().len(), 2);
    assert_eq!(resumed.active_layout_id(), Some(active_id.as_str()));
    assert_eq!(resumed.layouts()[1].widgets.len(), 6);
}

#[test]
fn test_malformed_snapshot_starts_empty() {
    let storage = MemoryStorage::new();
    storage.save(b"not json at all").unwrap();

    let store = LayoutStore::new(Box::new(storage.clone()), ids());
    assert!(store.layouts().is_empty());
    assert_eq!(store.active_layout_id(), None);
}

#[test]
fn test_snapshot_with_dangling_active_pointer_falls_back() {
    let storage = MemoryStorage::new();
    let snapshot = serde_json::json!({
        "layouts": [],
        "activeLayoutId": "gone",
        "gridConfig": {"columns": 24, "rows": 18}
    });
    storage
        .save(serde_json::to_vec(&snapshot).unwrap().as_slice())
        .unwrap();

    let store = LayoutStore::new(Box::new(storage.clone()), ids());
    assert_eq!(store.active_layout_id(), None);
}

// =============================================================================
// File backend
// =============================================================================

#[test]
fn test_file_storage_survives_store_restart() {
    let dir = temp_dir();

    let layout_id;
    {
        let mut store = LayoutStore::new(Box::new(FileStorage::new(&dir)), ids());
        layout_id = store.create_layout("Persisted", LayoutMode::Light);
    }

    let resumed = LayoutStore::new(Box::new(FileStorage::new(&dir)), ids());
    assert_eq!(resumed.layouts().len(), 1);
    assert_eq!(resumed.active_layout_id(), Some(layout_id.as_str()));
    assert_eq!(resumed.layouts()[0].name, "Persisted");

    fs::remove_dir_all(&dir).unwrap();
}

// =============================================================================
// SQLite backend
// =============================================================================

#[test]
fn test_sqlite_storage_survives_store_restart() {
    let dir = temp_dir();
    fs::create_dir_all(&dir).unwrap();
    let db_path = dir.join(format!("{}.db", STORAGE_NAME));

    let layout_id;
    {
        let storage = SqliteStorage::open(&db_path).unwrap();
        let mut store = LayoutStore::new(Box::new(storage), ids());
        layout_id = store.create_layout("Persisted", LayoutMode::Pro);
    }

    let storage = SqliteStorage::open(&db_path).unwrap();
    let resumed = LayoutStore::new(Box::new(storage), ids());
    assert_eq!(resumed.layouts().len(), 1);
    assert_eq!(resumed.active_layout_id(), Some(layout_id.as_str()));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_sqlite_in_memory_round_trip_through_store() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let mut store = LayoutStore::new(Box::new(storage), ids());

    let layout_id = store.create_layout("Ephemeral", LayoutMode::Light);
    assert_eq!(store.layout(&layout_id).unwrap().widgets.len(), 4);
}

// =============================================================================
// Config wiring
// =============================================================================

#[test]
fn test_storage_from_config_builds_each_backend() {
    let memory = Config {
        grid: GridConfig::default(),
        storage: StorageConfig {
            dir: PathBuf::new(),
            backend: StorageBackend::Memory,
        },
    };
    assert!(storage_from_config(&memory).is_ok());

    let dir = temp_dir();
    let file = Config {
        grid: GridConfig::default(),
        storage: StorageConfig {
            dir: dir.clone(),
            backend: StorageBackend::File,
        },
    };
    let storage = storage_from_config(&file).unwrap();
    storage.save(b"{}").unwrap();
    assert!(dir.join(format!("{}.json", STORAGE_NAME)).exists());
    fs::remove_dir_all(&dir).unwrap();

    let dir = temp_dir();
    let sqlite = Config {
        grid: GridConfig::default(),
        storage: StorageConfig {
            dir: dir.clone(),
            backend: StorageBackend::Sqlite,
        },
    };
    let storage = storage_from_config(&sqlite).unwrap();
    storage.save(b"{}").unwrap();
    assert_eq!(storage.load().unwrap(), Some(b"{}".to_vec()));
    fs::remove_dir_all(&dir).unwrap();
}
