//! Platform detection and backend selection.
//!
//! The only place that knows which platform we're on. Everything above
//! it talks to a [`PlatformStore`] through the [`Storage`] trait.

use std::fmt;

use crate::{Storage, StorageError};

/// Where the app is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// iOS, Android, desktop: an encrypted OS store is available.
    Native,
    /// A browser: only a plain key-value store is available.
    Web,
}

impl Platform {
    /// Detects the platform this binary was compiled for.
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Web => write!(f, "web"),
        }
    }
}

/// One of two backends, chosen once at construction time.
///
/// `S` is the secure store used on native platforms; `K` is the
/// key-value store used on the web. Both are supplied by the host
/// shell, which is the only code that knows how to reach them.
#[derive(Debug, Clone)]
pub enum PlatformStore<S, K> {
    Secure(S),
    KeyValue(K),
}

impl<S: Storage, K: Storage> PlatformStore<S, K> {
    /// Builds the backend for `platform`. Only the matching constructor
    /// runs.
    ///
    /// ```rust
    /// use loginkit_session::{MemoryStore, Platform, PlatformStore};
    ///
    /// let store = PlatformStore::select(Platform::Web, MemoryStore::new, MemoryStore::new);
    /// assert!(matches!(store, PlatformStore::KeyValue(_)));
    /// ```
    pub fn select(
        platform: Platform,
        secure: impl FnOnce() -> S,
        key_value: impl FnOnce() -> K,
    ) -> Self {
        tracing::debug!(%platform, "selecting session storage backend");
        match platform {
            Platform::Native => Self::Secure(secure()),
            Platform::Web => Self::KeyValue(key_value()),
        }
    }

    /// Which platform this backend was selected for.
    pub fn platform(&self) -> Platform {
        match self {
            Self::Secure(_) => Platform::Native,
            Self::KeyValue(_) => Platform::Web,
        }
    }
}

impl<S: Storage, K: Storage> Storage for PlatformStore<S, K> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Secure(store) => store.get(key).await,
            Self::KeyValue(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Secure(store) => store.set(key, value).await,
            Self::KeyValue(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Secure(store) => store.remove(key).await,
            Self::KeyValue(store) => store.remove(key).await,
        }
    }
}
