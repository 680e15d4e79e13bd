//! Token persistence and session state for Loginkit.
//!
//! 1. **Storage**: where the token lives ([`Storage`] trait, with
//!    [`MemoryStore`], [`FileStore`] and the platform-selected
//!    [`PlatformStore`]).
//! 2. **Session state**: who is signed in ([`SessionProvider`], observed
//!    through [`AuthContext`]).
//!
//! # How it fits in the stack
//!
//! ```text
//! UI shell (above)  ← renders splash / login / app from an AuthContext
//!     ↕
//! Session layer (this crate)  ← sole owner of the token
//!     ↕
//! Token layer (below)  ← decodes the token into the current user
//! ```

#![allow(async_fn_in_trait)]

mod config;
mod error;
mod file_store;
mod platform;
mod provider;
mod storage;

pub use config::{DEFAULT_TOKEN_KEY, SessionConfig};
pub use error::{SessionError, StorageError};
pub use file_store::FileStore;
pub use platform::{Platform, PlatformStore};
pub use provider::{AuthContext, SessionPhase, SessionProvider, SessionSnapshot};
pub use storage::{MemoryStore, Storage};
