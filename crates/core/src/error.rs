use thiserror::Error;

/// Failures raised while reading or writing the persisted task slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("task slot database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("task slot payload is not a valid task list: {0}")]
    Codec(#[from] serde_json::Error),
}
