//! The session provider: owns the current token and everything derived
//! from it.
//!
//! This is the single writer of session state. It is the only thing
//! that touches the token key in [`Storage`], and the only thing that
//! changes the in-memory token. Everyone else holds an [`AuthContext`]
//! and observes.
//!
//! ## Lifecycle
//!
//! ```text
//!                  ┌───────────────┐
//!                  │ Bootstrapping │  wait max(min_splash, store.get)
//!                  └───────┬───────┘
//!        valid token       │      no token / invalid token / load fault
//!        ┌─────────────────┴──────────────────┐
//!        ▼                                    ▼
//! ┌───────────────┐ ──── sign_out() ───→ ┌─────────────────┐
//! │ Authenticated │                      │ Unauthenticated │
//! └───────────────┘ ←─── sign_in() ───── └─────────────────┘
//! ```
//!
//! # Concurrency note
//!
//! Writers are serialized by an internal lock held for the whole
//! operation (store call + state update), so a `sign_out` can never
//! interleave with a `sign_in` and leave memory and storage
//! disagreeing. A `sign_in` issued while bootstrap is still running
//! waits for bootstrap to finish. There is no cancellation: once a
//! store call starts, it runs to completion.

use loginkit_token::{Claims, decode, is_valid};
use tokio::sync::{Mutex, watch};

use crate::{SessionConfig, SessionError, Storage};

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Where the provider is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Still loading the persisted token. The UI shows a splash screen.
    Bootstrapping,
    /// No token. The UI shows the login screens.
    Unauthenticated,
    /// A token is held. The UI shows the app.
    Authenticated,
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// The observable session state at one point in time.
///
/// `user` is always `decode(token)`; it is recomputed on every token
/// change and can't be set on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_loading: bool,
    pub token: Option<String>,
    pub user: Option<Claims>,
}

impl SessionSnapshot {
    fn loading() -> Self {
        Self {
            is_loading: true,
            token: None,
            user: None,
        }
    }

    fn with_token(token: Option<String>) -> Self {
        let user = token.as_deref().and_then(decode);
        Self {
            is_loading: false,
            token,
            user,
        }
    }

    /// `true` whenever a token is held, whether or not it decodes.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Bootstrapping
        } else if self.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }
}

// ---------------------------------------------------------------------------
// AuthContext
// ---------------------------------------------------------------------------

/// A read-only view of the session, handed down to UI consumers.
///
/// Cheap to clone. Every clone sees the latest state and can await
/// changes with [`changed`](Self::changed).
#[derive(Debug, Clone)]
pub struct AuthContext {
    rx: watch::Receiver<SessionSnapshot>,
}

impl AuthContext {
    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.rx.borrow().phase()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.rx.borrow().token.clone()
    }

    pub fn user(&self) -> Option<Claims> {
        self.rx.borrow().user.clone()
    }

    /// Waits for the next state change and returns the new state.
    ///
    /// Returns `None` once the provider has been dropped.
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Waits until bootstrap has finished and returns the state.
    ///
    /// Returns `None` if the provider was dropped before that.
    pub async fn loaded(&mut self) -> Option<SessionSnapshot> {
        self.rx
            .wait_for(|s| !s.is_loading)
            .await
            .ok()
            .map(|s| s.clone())
    }
}

// ---------------------------------------------------------------------------
// SessionProvider
// ---------------------------------------------------------------------------

/// Owns the session: the in-memory token, the derived user, and the
/// persisted copy.
///
/// ```rust
/// use loginkit_session::{MemoryStore, SessionConfig, SessionPhase, SessionProvider};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), loginkit_session::SessionError> {
/// let config = SessionConfig { min_splash_ms: 0, ..Default::default() };
/// let provider = SessionProvider::start(MemoryStore::new(), config).await;
/// assert_eq!(provider.phase(), SessionPhase::Unauthenticated);
///
/// let token = loginkit_token::generate_token("jane.doe@example.com");
/// provider.sign_in(token).await?;
/// assert_eq!(provider.context().user().unwrap().name, "Jane Doe");
///
/// provider.sign_out().await?;
/// assert!(!provider.context().is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionProvider<S: Storage> {
    store: S,
    config: SessionConfig,
    state: watch::Sender<SessionSnapshot>,
    /// Held for the duration of every write (bootstrap, sign-in, sign-out).
    write_lock: Mutex<()>,
}

impl<S: Storage> SessionProvider<S> {
    /// Creates a provider in the [`Bootstrapping`](SessionPhase::Bootstrapping)
    /// phase. Call [`bootstrap`](Self::bootstrap) to load the persisted token.
    pub fn new(store: S, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::loading());
        Self {
            store,
            config,
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a provider and runs bootstrap to completion.
    pub async fn start(store: S, config: SessionConfig) -> Self {
        let provider = Self::new(store, config);
        {
            let _guard = provider.write_lock.lock().await;
            provider.load().await;
        }
        provider
    }

    /// A read-only handle for consumers.
    pub fn context(&self) -> AuthContext {
        AuthContext {
            rx: self.state.subscribe(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Loads the persisted token and leaves the bootstrapping phase.
    ///
    /// Waits for *both* the minimum splash delay and the store read.
    /// Never fails because of storage: a load fault is logged and
    /// treated as "no token".
    ///
    /// # Errors
    /// [`SessionError::AlreadyBootstrapped`] if called more than once.
    pub async fn bootstrap(&self) -> Result<SessionPhase, SessionError> {
        let _guard = self.write_lock.lock().await;
        if !self.state.borrow().is_loading {
            return Err(SessionError::AlreadyBootstrapped);
        }
        Ok(self.load().await)
    }

    /// Caller must hold `write_lock`.
    async fn load(&self) -> SessionPhase {
        let key = self.config.token_key.as_str();

        let (_, loaded) = tokio::join!(
            tokio::time::sleep(self.config.min_splash()),
            self.store.get(key),
        );

        let token = match loaded {
            Ok(Some(token)) if is_valid(Some(token.as_str())) => Some(token),
            Ok(Some(_)) => {
                tracing::warn!("stored auth token is expired or unreadable, removing it");
                if let Err(e) = self.store.remove(key).await {
                    tracing::error!(error = %e, "error removing stale auth token");
                }
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "error loading auth token");
                None
            }
        };

        let phase = self.publish(token);
        tracing::info!(?phase, "session bootstrapped");
        phase
    }

    /// Persists `token`, then makes it the current session.
    ///
    /// The store write happens first: if it fails, the in-memory
    /// session is untouched and the fault is returned, so the UI never
    /// shows a signed-in state that wouldn't survive a restart.
    ///
    /// # Errors
    /// [`SessionError::Storage`] if the token couldn't be persisted.
    pub async fn sign_in(&self, token: String) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.store.set(&self.config.token_key, &token).await {
            tracing::error!(error = %e, "error saving auth token");
            return Err(e.into());
        }

        self.publish(Some(token));
        if self.state.borrow().user.is_none() {
            tracing::warn!("signed in with a token whose payload can't be decoded");
        }
        tracing::info!("signed in");
        Ok(())
    }

    /// Removes the persisted token, then clears the current session.
    ///
    /// Signing out while already signed out just removes nothing.
    ///
    /// # Errors
    /// [`SessionError::Storage`] if the token couldn't be removed. The
    /// session stays signed in.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.store.remove(&self.config.token_key).await {
            tracing::error!(error = %e, "error removing auth token");
            return Err(e.into());
        }

        self.publish(None);
        tracing::info!("signed out");
        Ok(())
    }

    /// Replaces the snapshot, recomputing `user` from `token`.
    fn publish(&self, token: Option<String>) -> SessionPhase {
        let snapshot = SessionSnapshot::with_token(token);
        let phase = snapshot.phase();
        self.state.send_replace(snapshot);
        phase
    }
}
