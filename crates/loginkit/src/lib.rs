//! # Loginkit
//!
//! Email/password sign-in backed by a simulated login API.
//!
//! The simulator hands out structurally valid but **unsigned** tokens.
//! Loginkit persists the token through a platform-selected store,
//! decodes it (without verification) into the current user, and keeps
//! the session signed in until the token's `exp` passes or the user
//! signs out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loginkit::prelude::*;
//!
//! # async fn run() -> Result<(), LoginkitError> {
//! let kit = Loginkit::builder()
//!     .build(FileStore::new("session.json"))
//!     .await;
//!
//! match kit.submit("jane.doe@example.com", "secret123").await? {
//!     Submitted::SignedIn(user) => println!("hello {:?}", user.map(|u| u.name)),
//!     Submitted::Rejected(reason) => println!("{reason}"),
//!     Submitted::Invalid(errors) => println!("{errors:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod app;
mod error;
mod flow;

pub use app::{Loginkit, LoginkitBuilder};
pub use error::LoginkitError;
pub use flow::{Submitted, submit_credentials};

pub mod prelude {
    //! Everything a UI shell needs: `use loginkit::prelude::*;`

    pub use crate::{Loginkit, LoginkitBuilder, LoginkitError, Submitted, submit_credentials};
    pub use loginkit_login::{
        FakeLogin, FormErrors, LoginApi, LoginConfig, LoginFailure, LoginOutcome,
        validate_credentials,
    };
    pub use loginkit_session::{
        AuthContext, FileStore, MemoryStore, Platform, PlatformStore, SessionConfig,
        SessionError, SessionPhase, SessionProvider, SessionSnapshot, Storage, StorageError,
    };
    pub use loginkit_token::{
        Claims, TokenConfig, TokenError, decode, generate_token, is_valid, unix_now,
    };
}
