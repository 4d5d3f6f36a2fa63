pub mod local;
pub mod memory;

use serde_json::Value;

/// Abstract key-value persistence port for the entity store.
/// Implementations: LocalPersistence (one JSON file per key),
/// MemoryPersistence (in-process, for tests and ephemeral sessions).
pub trait Persistence: Send + Sync {
    /// Load the value stored under `key`. `Ok(None)` when the key is absent.
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if present.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed value under key {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid persistence key: {0}")]
    InvalidKey(String),
}
