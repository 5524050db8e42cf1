use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tokio::fs;

use crate::errors::{StorageReadError, StorageRemoveError, StorageWriteError};

/// Durable device storage: string values under string keys.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ServerError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ServerError>;

    /// Removing an absent key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), ServerError>;
}

/// Process-local storage. Contents are lost with the process.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for InMemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ServerError> {
        let items = self
            .items
            .lock()
            .map_err(|e| StorageReadError::with_debug(key, &e))?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ServerError> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StorageWriteError::with_debug(key, &e))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), ServerError> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StorageRemoveError::with_debug(key, &e))?;
        items.remove(key);
        Ok(())
    }
}

/// Bytes kept as-is in file names. `%` is encoded, so distinct keys always
/// map to distinct files.
const FILE_NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// One file per key inside a directory. Writes go to a temporary sibling and
/// are renamed into place, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    /// The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name = utf8_percent_encode(key, FILE_NAME_ENCODE_SET);
        self.root.join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl KeyValueStorage for DirectoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ServerError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageReadError::with_debug(key, &e)),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ServerError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageWriteError::with_debug(key, &e))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .await
            .map_err(|e| StorageWriteError::with_debug(key, &e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageWriteError::with_debug(key, &e))?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), ServerError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageRemoveError::with_debug(key, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn in_memory_set_get_remove() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get_item("persist:root").await.unwrap(), None);

        storage.set_item("persist:root", "{}").await.unwrap();
        assert_eq!(
            storage.get_item("persist:root").await.unwrap().as_deref(),
            Some("{}")
        );

        storage.remove_item("persist:root").await.unwrap();
        storage.remove_item("persist:root").await.unwrap();
        assert_eq!(storage.get_item("persist:root").await.unwrap(), None);
    }

    #[tokio::test]
    async fn directory_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("state");

        let storage = DirectoryStorage::new(&root);
        storage
            .set_item("persist:recurring", r#"{"version":1}"#)
            .await
            .unwrap();
        storage.set_item("persist:recurring", r#"{"version":2}"#).await.unwrap();

        let reopened = DirectoryStorage::new(&root);
        assert_eq!(
            reopened.get_item("persist:recurring").await.unwrap().as_deref(),
            Some(r#"{"version":2}"#)
        );
        assert!(root.join("persist%3Arecurring.json").exists());
        assert!(!root.join("persist%3Arecurring.json.tmp").exists());
    }

    #[tokio::test]
    async fn similar_keys_get_separate_files() {
        let dir = TempDir::new().unwrap();
        let storage = DirectoryStorage::new(dir.path());
        let keys = ["persist:root", "persist_root", "persist%3Aroot", "persist/root"];
        for (i, key) in keys.iter().enumerate() {
            storage.set_item(key, &i.to_string()).await.unwrap();
        }
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(
                storage.get_item(key).await.unwrap(),
                Some(i.to_string()),
                "{key} was overwritten"
            );
        }
    }

    #[tokio::test]
    async fn directory_storage_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = DirectoryStorage::new(dir.path());
        assert_eq!(storage.get_item("persist:auth").await.unwrap(), None);
        storage.remove_item("persist:auth").await.unwrap();
    }
}
