// File-backed session store
// A JSON object mapping store keys to serialized values

use super::*;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P, key: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            key: key.to_string(),
        }
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StorageError::InvalidData(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::ConnectionError(format!(
                "Failed to read '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl DirectoryStore for FileStore {
    async fn load(&self) -> Result<Vec<IdentityRecord>, StorageError> {
        let entries = self.read_entries().await?;
        match entries.get(&self.key) {
            Some(raw) => decode_records(raw),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, records: &[IdentityRecord]) -> Result<(), StorageError> {
        let mut entries = self.read_entries().await?;
        entries.insert(self.key.clone(), encode_records(records)?);
        let contents = serde_json::to_string_pretty(&entries)?;

        // Write then rename so a reader never sees a half-written file
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Failed to write '{}': {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Failed to replace '{}': {}", self.path.display(), e)))?;

        debug!("Saved {} record(s) to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> IdentityRecord {
        IdentityRecord::student(id.to_string(), "Name".to_string(), "hash".to_string(), vec![])
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("portal.json"), "db");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.json");

        FileStore::new(&path, "db")
            .save(&[record("305123456")])
            .await
            .unwrap();

        let reopened = FileStore::new(&path, "db");
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].subject_id, "305123456");
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.json");

        FileStore::new(&path, "a").save(&[record("111111111")]).await.unwrap();
        FileStore::new(&path, "b").save(&[]).await.unwrap();

        assert_eq!(FileStore::new(&path, "a").load().await.unwrap().len(), 1);
        assert!(FileStore::new(&path, "b").load().await.unwrap().is_empty());
    }
}
