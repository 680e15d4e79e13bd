//! Token generation settings.

use serde::{Deserialize, Serialize};

use crate::claims::DEFAULT_TTL_SECS;

/// Configuration for [`generate_token_with`](crate::generate_token_with).
///
/// Sensible defaults are provided; override just the fields you care
/// about with `TokenConfig { ttl_secs: 60, ..Default::default() }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Seconds between `iat` and `exp`. Default: 86400 (24 hours).
    pub ttl_secs: i64,

    /// Number of hex characters in the signature segment. Default: 32.
    pub signature_len: usize,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            signature_len: 32,
        }
    }
}

impl TokenConfig {
    /// Fixes values that would break the token invariants.
    ///
    /// - `ttl_secs` is at least 1, so `exp > iat` always holds.
    /// - `signature_len` is at least 1, so the third segment is never empty.
    pub fn validated(mut self) -> Self {
        if self.ttl_secs < 1 {
            tracing::warn!(ttl_secs = self.ttl_secs, "ttl_secs below 1, clamping");
            self.ttl_secs = 1;
        }
        if self.signature_len == 0 {
            tracing::warn!("signature_len is 0, clamping to 1");
            self.signature_len = 1;
        }
        self
    }
}
