//! The fixed set of reasons a login attempt can fail.

/// Why the simulated login API rejected an attempt.
///
/// These are *expected* outcomes, not faults: they travel inside
/// [`LoginOutcome::Failure`](crate::LoginOutcome::Failure) and their
/// `Display` text is the user-facing message.
///
/// The first two are deterministic input checks. The rest are picked
/// at random to emulate a flaky server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LoginFailure {
    /// Password is empty or shorter than 4 characters.
    #[error("Password must be at least 4 characters.")]
    PasswordTooShort,

    /// Email is empty or has no `@`.
    #[error("A valid email address is required.")]
    InvalidEmail,

    #[error("Server error. Please try again.")]
    ServerError,

    #[error("Authentication service unavailable.")]
    ServiceUnavailable,

    #[error("Request timed out. Check your connection.")]
    TimedOut,

    #[error("Too many attempts. Please wait a moment.")]
    TooManyAttempts,
}

impl LoginFailure {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PasswordTooShort,
        Self::InvalidEmail,
        Self::ServerError,
        Self::ServiceUnavailable,
        Self::TimedOut,
        Self::TooManyAttempts,
    ];

    /// The failures the simulator picks from at random.
    pub const SIMULATED: [Self; 4] = [
        Self::ServerError,
        Self::ServiceUnavailable,
        Self::TimedOut,
        Self::TooManyAttempts,
    ];

    /// `true` for the failures caused by bad input. Retrying with the
    /// same credentials will fail the same way.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::PasswordTooShort | Self::InvalidEmail)
    }

    /// Parses a user-facing message back into its variant.
    pub fn from_message(message: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.to_string() == message)
    }
}
