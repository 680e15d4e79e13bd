//! The result of a login attempt, and its wire shape.
//!
//! On the wire an outcome is one of:
//!
//! ```text
//! {"success":true,"token":"eyJ..."}
//! {"success":false,"error":"Server error. Please try again."}
//! ```

use serde::{Deserialize, Serialize};

use crate::LoginFailure;

/// What the login API answered.
///
/// Expected failures are values, not errors: the simulator never
/// returns `Err` and never panics for bad credentials or a simulated
/// outage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireOutcome", try_from = "WireOutcome")]
pub enum LoginOutcome {
    /// The attempt succeeded; here's a freshly generated token.
    Success { token: String },
    /// The attempt failed for one of the enumerated reasons.
    Failure { error: LoginFailure },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The token, if the attempt succeeded.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Success { token } => Some(token),
            Self::Failure { .. } => None,
        }
    }

    /// The failure, if the attempt failed.
    pub fn error(&self) -> Option<LoginFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(*error),
        }
    }

    /// Converts into a `Result` so callers can use `?` / `match`.
    pub fn into_result(self) -> Result<String, LoginFailure> {
        match self {
            Self::Success { token } => Ok(token),
            Self::Failure { error } => Err(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Flat `{success, token?, error?}` record that serde maps to and from.
#[derive(Serialize, Deserialize)]
struct WireOutcome {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<LoginOutcome> for WireOutcome {
    fn from(outcome: LoginOutcome) -> Self {
        match outcome {
            LoginOutcome::Success { token } => Self {
                success: true,
                token: Some(token),
                error: None,
            },
            LoginOutcome::Failure { error } => Self {
                success: false,
                token: None,
                error: Some(error.to_string()),
            },
        }
    }
}

impl TryFrom<WireOutcome> for LoginOutcome {
    type Error = String;

    fn try_from(wire: WireOutcome) -> Result<Self, Self::Error> {
        match (wire.success, wire.token, wire.error) {
            (true, Some(token), _) => Ok(Self::Success { token }),
            (true, None, _) => Err("successful outcome without a token".into()),
            (false, _, Some(message)) => LoginFailure::from_message(&message)
                .map(|error| Self::Failure { error })
                .ok_or_else(|| format!("unknown login error: {message}")),
            (false, _, None) => Err("failed outcome without an error".into()),
        }
    }
}
