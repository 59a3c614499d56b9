// Session store abstraction
// The directory is kept under a single key and is read and rewritten in full

pub mod file;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::models::{IdentityRecord, StorageConfig};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage backend for the identity directory
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Load every persisted record, in storage order
    async fn load(&self) -> Result<Vec<IdentityRecord>, StorageError>;

    /// Replace the persisted collection
    async fn save(&self, records: &[IdentityRecord]) -> Result<(), StorageError>;
}

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::SerializationError(e.to_string())
    }
}

pub(crate) fn decode_records(raw: &str) -> Result<Vec<IdentityRecord>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::InvalidData(e.to_string()))
}

pub(crate) fn encode_records(records: &[IdentityRecord]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(records)?)
}

/// Factory function to create the session store based on configuration
pub fn create_store(config: &StorageConfig, key: &str) -> Arc<dyn DirectoryStore> {
    match config {
        StorageConfig::Memory => {
            info!("Using in-memory session store (key '{}')", key);
            Arc::new(MemoryStore::new(key))
        }
        StorageConfig::File { path } => {
            info!("Using file session store at {} (key '{}')", path, key);
            Arc::new(FileStore::new(path, key))
        }
    }
}
