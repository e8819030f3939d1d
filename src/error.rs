use thiserror::Error;

/// Layout store error types.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Malformed layout import: {0}")]
    MalformedImport(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
