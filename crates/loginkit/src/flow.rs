//! The sign-in flow: form → login API → session.
//!
//! ```text
//! submit(email, password)
//!     │
//!     ├─ validate_credentials ── errors ──→ Submitted::Invalid
//!     ▼
//! LoginApi::login ─────────── failure ──→ Submitted::Rejected
//!     ▼
//! SessionProvider::sign_in ── fault ────→ Err(LoginkitError)
//!     ▼
//! Submitted::SignedIn(user)
//! ```

use loginkit_login::{FormErrors, LoginApi, LoginFailure, validate_credentials};
use loginkit_session::{SessionProvider, Storage};
use loginkit_token::Claims;

use crate::LoginkitError;

/// What happened to a submitted login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// The form didn't pass validation; nothing was sent.
    Invalid(FormErrors),
    /// The login API said no. Show the message; the user may retry.
    Rejected(LoginFailure),
    /// Signed in and persisted. `None` only if the API returned a
    /// token whose payload can't be decoded.
    SignedIn(Option<Claims>),
}

/// Runs one login attempt end to end.
///
/// # Errors
/// [`LoginkitError::Session`] if the login succeeded but the token
/// couldn't be persisted. The session stays signed out.
pub async fn submit_credentials<A, S>(
    api: &mut A,
    session: &SessionProvider<S>,
    email: &str,
    password: &str,
) -> Result<Submitted, LoginkitError>
where
    A: LoginApi,
    S: Storage,
{
    let errors = validate_credentials(email, password);
    if !errors.is_empty() {
        tracing::debug!(?errors, "login form rejected");
        return Ok(Submitted::Invalid(errors));
    }

    let token = match api.login(email, password).await.into_result() {
        Ok(token) => token,
        Err(error) => {
            if error.is_validation() {
                tracing::debug!(%error, "login attempt rejected by input checks");
            } else {
                tracing::info!(%error, "login attempt failed, user may retry");
            }
            return Ok(Submitted::Rejected(error));
        }
    };

    session.sign_in(token).await?;
    Ok(Submitted::SignedIn(session.snapshot().user))
}
