//! A persistent key-value store backed by one JSON file.
//!
//! Plays the role of the browser's key-value storage outside a browser:
//! every entry lives in a single `{"key": "value"}` object on disk.
//! Writes go to a sibling temp file first and are renamed into place,
//! so a crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::{Storage, StorageError};

type Entries = BTreeMap<String, String>;

/// A [`Storage`] that persists to a JSON file.
///
/// The file is created on the first write. A missing file reads as an
/// empty store; a file that isn't a JSON string map is
/// [`StorageError::Corrupt`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Entries::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&tmp).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl Storage for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("session.json"))
    }

    #[tokio::test]
    async fn test_get_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("auth_token").await.unwrap(), None);
        assert!(!store.path().exists(), "reads must not create the file");
    }

    #[tokio::test]
    async fn test_set_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).set("auth_token", "a.b.c").await.unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get("auth_token").await.unwrap().as_deref(),
            Some("a.b.c")
        );
    }

    #[tokio::test]
    async fn test_set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("theme", "dark").await.unwrap();
        store.set("auth_token", "t").await.unwrap();
        store.remove("auth_token").await.unwrap();

        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("auth_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/deeper/session.json"));

        store.set("auth_token", "t").await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_returns_corrupt_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), b"not json").await.unwrap();

        let result = store.get("auth_token").await;
        assert!(matches!(result, Err(StorageError::Corrupt(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn test_path_is_a_directory_returns_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let result = store.set("auth_token", "t").await;
        assert!(matches!(result, Err(StorageError::Io(_))), "got {result:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("auth_token", "t").await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
