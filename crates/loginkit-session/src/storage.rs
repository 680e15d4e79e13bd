//! The storage capability, and an in-memory backend.
//!
//! Loginkit persists exactly one value (the raw token under
//! `auth_token`), but where it lives depends on the platform: an
//! encrypted OS store on native, a key-value store in the browser.
//! Business logic only ever sees the [`Storage`] trait.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::StorageError;

/// An async string key-value store.
///
/// Every operation is awaitable because native secure stores are
/// asynchronous. Faults are returned, never swallowed.
///
/// `&self` methods: backends use interior mutability, so a store can
/// be shared between the session provider and diagnostics without
/// handing out `&mut`.
pub trait Storage: Send + Sync + 'static {
    /// Reads the value stored under `key`, or `None` if there is none.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}

/// A process-local store. Nothing survives a restart.
///
/// Cloning is cheap and every clone sees the same entries, so a test
/// can keep a handle after giving the store to a provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Storage for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("auth_token").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_store_set_then_get() {
        let store = MemoryStore::new();
        store.set("auth_token", "a.b.c").await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap().as_deref(), Some("a.b.c"));
    }

    #[tokio::test]
    async fn test_memory_store_set_replaces_value() {
        let store = MemoryStore::with_entries([("auth_token", "old")]);
        store.set("auth_token", "new").await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap().as_deref(), Some("new"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_remove_missing_is_ok() {
        let store = MemoryStore::new();
        store.remove("auth_token").await.expect("removing nothing is fine");
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(handle.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
