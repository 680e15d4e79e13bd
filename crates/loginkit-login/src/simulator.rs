//! The simulated login API.
//!
//! There is no server. [`FakeLogin`] sleeps for a random "network"
//! delay, runs two deterministic input checks, fails at random some of
//! the time, and otherwise hands back a freshly generated token.
//!
//! ```text
//! login(email, password)
//!     │
//!     ▼ sleep(random min..=max ms)
//!     │
//!     ├─ password < 4 chars ─────→ Failure(PasswordTooShort)
//!     ├─ email empty / no '@' ───→ Failure(InvalidEmail)
//!     ├─ random() < failure_rate → Failure(random server error)
//!     └─ otherwise ──────────────→ Success(token)
//! ```

use std::time::Duration;

use loginkit_token::{TokenConfig, generate_token_with, unix_now};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{LoginConfig, LoginFailure, LoginOutcome};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Something that can answer a login attempt.
///
/// The real app would implement this over HTTP; [`FakeLogin`] is the
/// simulator. Test doubles implement it too.
///
/// `login` takes `&mut self` because the simulator advances its random
/// source on every call. The returned future is `Send` so it can be
/// driven from any Tokio task.
pub trait LoginApi: Send + 'static {
    /// Attempts to log in. Always resolves to an outcome; never errors.
    fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = LoginOutcome> + Send;
}

/// The simulated login API.
///
/// Generic over the random source so tests can inject a seeded RNG.
/// The default, [`StdRng`] seeded from the OS, is what the app uses.
///
/// # Example
///
/// ```rust
/// use loginkit_login::{FakeLogin, LoginApi, LoginConfig, LoginFailure};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut api = FakeLogin::new(LoginConfig::reliable());
///
/// let outcome = api.login("jane@example.com", "abc").await;
/// assert_eq!(outcome.error(), Some(LoginFailure::PasswordTooShort));
///
/// let outcome = api.login("jane@example.com", "secret").await;
/// assert!(outcome.is_success());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FakeLogin<R = StdRng> {
    config: LoginConfig,
    token_config: TokenConfig,
    rng: R,
}

impl FakeLogin<StdRng> {
    /// Creates a simulator with an OS-seeded random source.
    pub fn new(config: LoginConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a simulator whose every random choice follows `seed`.
    pub fn seeded(config: LoginConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for FakeLogin<StdRng> {
    fn default() -> Self {
        Self::new(LoginConfig::default())
    }
}

impl<R: Rng> FakeLogin<R> {
    /// Creates a simulator with an explicit random source.
    pub fn with_rng(config: LoginConfig, rng: R) -> Self {
        Self {
            config: config.validated(),
            token_config: TokenConfig::default(),
            rng,
        }
    }

    /// Overrides the settings used for generated tokens.
    pub fn token_config(mut self, config: TokenConfig) -> Self {
        self.token_config = config;
        self
    }

    /// The (validated) simulator settings.
    pub fn config(&self) -> &LoginConfig {
        &self.config
    }

    fn latency(&mut self) -> Duration {
        let ms = self
            .rng
            .random_range(self.config.min_delay_ms..=self.config.max_delay_ms);
        Duration::from_millis(ms)
    }

    fn simulated_failure(&mut self) -> Option<LoginFailure> {
        if !self.rng.random_bool(self.config.failure_rate) {
            return None;
        }
        let index = self.rng.random_range(0..LoginFailure::SIMULATED.len());
        Some(LoginFailure::SIMULATED[index])
    }
}

/// The deterministic input checks, in the order the API applies them.
///
/// Independent of any randomness: the same inputs always give the same
/// answer. When both inputs are bad, the password failure wins.
pub fn check_credentials(
    email: &str,
    password: &str,
) -> Result<(), LoginFailure> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LoginFailure::PasswordTooShort);
    }
    if email.is_empty() || !email.contains('@') {
        return Err(LoginFailure::InvalidEmail);
    }
    Ok(())
}

impl<R: Rng + Send + 'static> LoginApi for FakeLogin<R> {
    async fn login(&mut self, email: &str, password: &str) -> LoginOutcome {
        let delay = self.latency();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "simulating network latency");
        tokio::time::sleep(delay).await;

        if let Err(error) = check_credentials(email, password) {
            tracing::debug!(%error, "login rejected by input checks");
            return LoginOutcome::Failure { error };
        }

        if let Some(error) = self.simulated_failure() {
            tracing::warn!(%error, "simulated server failure");
            return LoginOutcome::Failure { error };
        }

        let token = generate_token_with(
            email,
            &self.token_config,
            unix_now(),
            &mut self.rng,
        );
        tracing::info!("login succeeded");
        LoginOutcome::Success { token }
    }
}
