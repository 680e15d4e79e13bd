//! Login simulator settings.

use serde::{Deserialize, Serialize};

/// Configuration for [`FakeLogin`](crate::FakeLogin).
///
/// The defaults emulate a slow, somewhat unreliable server: 1.2–2.2 s
/// of latency and a 30% chance of a random server failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Shortest simulated latency, in milliseconds (inclusive).
    pub min_delay_ms: u64,

    /// Longest simulated latency, in milliseconds (inclusive).
    pub max_delay_ms: u64,

    /// Probability (0.0–1.0) that a well-formed attempt fails with a
    /// random server error. Set to 0.0 to force success, 1.0 to force
    /// failure.
    pub failure_rate: f64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1_200,
            max_delay_ms: 2_200,
            failure_rate: 0.3,
        }
    }
}

impl LoginConfig {
    /// A config that never fails at random and has no latency.
    ///
    /// Handy for tests and demos that only care about the input checks.
    pub fn reliable() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
            failure_rate: 0.0,
        }
    }

    /// Clamp and fix any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`FakeLogin::new`](crate::FakeLogin::new).
    /// - `failure_rate` clamped to `0.0..=1.0` (NaN becomes 0.0).
    /// - An inverted delay range is swapped.
    pub fn validated(mut self) -> Self {
        if self.failure_rate.is_nan() {
            tracing::warn!("failure_rate is NaN, using 0.0");
            self.failure_rate = 0.0;
        } else if !(0.0..=1.0).contains(&self.failure_rate) {
            tracing::warn!(
                failure_rate = self.failure_rate,
                "failure_rate outside 0.0..=1.0, clamping"
            );
            self.failure_rate = self.failure_rate.clamp(0.0, 1.0);
        }
        if self.min_delay_ms > self.max_delay_ms {
            tracing::warn!(
                min = self.min_delay_ms,
                max = self.max_delay_ms,
                "delay range inverted, swapping"
            );
            std::mem::swap(&mut self.min_delay_ms, &mut self.max_delay_ms);
        }
        self
    }
}
