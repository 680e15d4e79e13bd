//! Error types for the token layer.
//!
//! Each crate in Loginkit defines its own error enum. A `TokenError`
//! always means "this string is not a token we can read": the segment
//! count is wrong, a segment isn't base64url, or the payload isn't the
//! JSON record we expect.

/// Errors that can occur while reading a token.
///
/// Most callers never see these: [`decode`](crate::decode) and
/// [`is_valid`](crate::is_valid) collapse every failure into `None` /
/// `false`. Use [`try_decode`](crate::try_decode) when you need to know
/// *why* a token was rejected (logging, debugging a foreign token).
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The base64url text has a length that no padding can fix.
    ///
    /// Base64 packs 3 bytes into 4 characters. A final group of 2 or 3
    /// characters can be padded back to 4, but a lone leftover character
    /// carries only 6 bits, not even one byte.
    #[error("invalid base64url length {0}")]
    InvalidLength(usize),

    /// A character outside the base64url (or standard base64) alphabet.
    #[error("invalid base64url character {ch:?} at index {index}")]
    InvalidCharacter { ch: char, index: usize },

    /// The native decoder rejected the (already normalized) input.
    #[cfg(feature = "native-base64")]
    #[error("base64 decode failed: {0}")]
    Base64(base64::DecodeError),

    /// The token doesn't split into exactly `header.payload.signature`.
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),

    /// The decoded segment isn't the JSON record we expect.
    ///
    /// Common causes: not JSON at all, or a payload missing one of
    /// `sub`, `name`, `email`, `iat`, `exp`.
    #[error("malformed token segment: {0}")]
    Json(#[from] serde_json::Error),
}
