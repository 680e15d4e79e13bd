//! `Loginkit` builder and handle.
//!
//! Ties the layers together: one login API and one session provider,
//! shared by whatever UI shell sits on top.

use loginkit_login::{FakeLogin, LoginApi, LoginConfig};
use loginkit_session::{AuthContext, SessionConfig, SessionProvider, Storage};
use tokio::sync::Mutex;

use crate::{LoginkitError, Submitted, submit_credentials};

/// Builder for a [`Loginkit`].
///
/// # Example
///
/// ```rust
/// use loginkit::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), LoginkitError> {
/// let kit = Loginkit::builder()
///     .login_config(LoginConfig::reliable())
///     .session_config(SessionConfig { min_splash_ms: 0, ..Default::default() })
///     .build(MemoryStore::new())
///     .await;
///
/// let submitted = kit.submit("jane.doe@example.com", "secret123").await?;
/// assert!(matches!(submitted, Submitted::SignedIn(Some(_))));
/// assert!(kit.context().is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoginkitBuilder {
    login_config: LoginConfig,
    session_config: SessionConfig,
    seed: Option<u64>,
}

impl LoginkitBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the login simulator configuration.
    pub fn login_config(mut self, config: LoginConfig) -> Self {
        self.login_config = config;
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Seeds the simulator's random source for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds with the [`FakeLogin`] simulator and bootstraps the
    /// session from `store`.
    pub async fn build<S: Storage>(self, store: S) -> Loginkit<S> {
        let api = match self.seed {
            Some(seed) => FakeLogin::seeded(self.login_config.clone(), seed),
            None => FakeLogin::new(self.login_config.clone()),
        };
        self.build_with_api(store, api).await
    }

    /// Builds with a custom [`LoginApi`] and bootstraps the session.
    pub async fn build_with_api<S: Storage, A: LoginApi>(
        self,
        store: S,
        api: A,
    ) -> Loginkit<S, A> {
        let session = SessionProvider::start(store, self.session_config).await;
        Loginkit {
            api: Mutex::new(api),
            session,
        }
    }
}

/// A bootstrapped login API plus session.
///
/// `submit` holds the API for the whole attempt, so only one login is
/// in flight at a time.
#[derive(Debug)]
pub struct Loginkit<S: Storage, A: LoginApi = FakeLogin> {
    api: Mutex<A>,
    session: SessionProvider<S>,
}

impl Loginkit<loginkit_session::MemoryStore> {
    /// Creates a new builder.
    pub fn builder() -> LoginkitBuilder {
        LoginkitBuilder::new()
    }
}

impl<S: Storage, A: LoginApi> Loginkit<S, A> {
    /// A read-only session handle for UI consumers.
    pub fn context(&self) -> AuthContext {
        self.session.context()
    }

    /// The session provider, for direct sign-in/sign-out.
    pub fn session(&self) -> &SessionProvider<S> {
        &self.session
    }

    /// Validates the form, calls the login API, and signs in on success.
    ///
    /// # Errors
    /// See [`submit_credentials`].
    pub async fn submit(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Submitted, LoginkitError> {
        let mut api = self.api.lock().await;
        submit_credentials(&mut *api, &self.session, email, password).await
    }

    /// Signs out and clears the persisted token.
    ///
    /// # Errors
    /// [`LoginkitError::Session`] if the token couldn't be removed.
    pub async fn sign_out(&self) -> Result<(), LoginkitError> {
        Ok(self.session.sign_out().await?)
    }
}
