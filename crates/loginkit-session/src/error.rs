//! Error types for the session layer.

/// A storage backend failed.
///
/// Backends never swallow faults: a failed read, write or delete comes
/// back to the caller as one of these. Deciding what to do about it
/// (log and degrade, or surface to the user) is the
/// [`SessionProvider`](crate::SessionProvider)'s job.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but isn't a JSON string map.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A host-provided backend (OS keychain, browser storage, ...)
    /// reported a failure.
    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Errors returned by [`SessionProvider`](crate::SessionProvider).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Persisting or removing the token failed. The in-memory session
    /// was left unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// `bootstrap()` was called on a provider that already finished
    /// bootstrapping.
    #[error("session already bootstrapped")]
    AlreadyBootstrapped,
}
