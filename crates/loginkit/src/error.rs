//! Unified error type for Loginkit.

use loginkit_session::SessionError;

/// Top-level error for the `loginkit` facade.
///
/// `#[from]` makes `?` convert sub-crate errors automatically. The only
/// fault the facade can hit is a session write that didn't reach the
/// store: token read failures stay inside the session layer (an
/// unreadable token just means "signed out"), and storage faults reach
/// the facade wrapped in [`SessionError::Storage`].
///
/// Expected login failures are *not* here: they are values
/// ([`LoginFailure`](loginkit_login::LoginFailure)), not faults.
#[derive(Debug, thiserror::Error)]
pub enum LoginkitError {
    /// The session provider couldn't complete a sign-in or sign-out.
    #[error(transparent)]
    Session(#[from] SessionError),
}
