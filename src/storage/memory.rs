// In-memory session store
// Emulates a browser session store: string keys holding serialized values

use super::*;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process key-value store, cleared when the process exits
pub struct MemoryStore {
    key: String,
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store that keeps the directory under `key`
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Raw serialized value for a key
    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn set_item(&self, key: &str, value: String) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    /// Drop everything, as when the browser session ends
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn load(&self) -> Result<Vec<IdentityRecord>, StorageError> {
        match self.get_item(&self.key).await {
            Some(raw) => decode_records(&raw),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, records: &[IdentityRecord]) -> Result<(), StorageError> {
        let raw = encode_records(records)?;
        self.set_item(&self.key, raw).await;
        debug!("Saved {} record(s) under '{}'", records.len(), self.key);
        Ok(())
    }
}
