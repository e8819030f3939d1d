pub mod catalog;
pub mod file_storage;
pub mod grid;
pub mod ids;
pub mod layout_store;
pub mod sqlite_storage;
pub mod storage;

pub use catalog::{StarterWidget, WidgetSpec};
pub use file_storage::FileStorage;
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use layout_store::{LayoutStore, StoreEvent, SubscriberId};
pub use sqlite_storage::SqliteStorage;
pub use storage::{storage_from_config, MemoryStorage, SnapshotStorage, STORAGE_NAME};
