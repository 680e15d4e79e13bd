//! Simulated login API for Loginkit.
//!
//! 1. **Form validation**: [`validate_credentials`] gives per-field
//!    messages before anything is sent.
//! 2. **Login API**: the [`LoginApi`] trait, implemented by the
//!    [`FakeLogin`] simulator (random latency, random failures, and a
//!    generated token on success).
//! 3. **Outcome**: [`LoginOutcome`] / [`LoginFailure`], the structured
//!    answer. Expected failures are values, never panics or `Err`s.
//!
//! # Testing against randomness
//!
//! Every random choice goes through the simulator's RNG. Inject one
//! with [`FakeLogin::seeded`] / [`FakeLogin::with_rng`], and force the
//! random-failure branch with `failure_rate: 0.0` or `1.0`.

#![allow(async_fn_in_trait)]

mod config;
mod error;
mod form;
mod outcome;
mod simulator;

pub use config::LoginConfig;
pub use error::LoginFailure;
pub use form::{FormErrors, validate_credentials};
pub use outcome::LoginOutcome;
pub use simulator::{FakeLogin, LoginApi, MIN_PASSWORD_LEN, check_credentials};
