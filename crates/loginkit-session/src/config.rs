//! Session provider settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The storage key the raw token lives under.
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";

/// Configuration for [`SessionProvider`](crate::SessionProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key the token is persisted under. Default: `auth_token`.
    pub token_key: String,

    /// Minimum time bootstrap takes, in milliseconds, even when the
    /// store answers instantly. Keeps the splash screen from flashing.
    /// Default: 2000.
    pub min_splash_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            min_splash_ms: 2_000,
        }
    }
}

impl SessionConfig {
    pub fn min_splash(&self) -> Duration {
        Duration::from_millis(self.min_splash_ms)
    }
}
