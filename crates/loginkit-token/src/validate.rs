//! Token decoder and validator.
//!
//! Reads the payload of a token **without verifying anything**: there
//! is no key and the signature is random. Tokens may be corrupted or
//! come from somewhere else entirely, so the public entry points never
//! fail loudly. [`decode`] returns `None` and [`is_valid`] returns
//! `false` for anything they can't read.
//!
//! Validity and decoding read the payload differently. [`is_valid`]
//! only looks at `exp`, so a foreign token carrying nothing but an
//! expiry still counts. [`decode`] needs the full [`Claims`] record.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::claims::{Claims, Header};
use crate::clock::unix_now;
use crate::TokenError;

/// Splits a token into its three segments.
fn segments(token: &str) -> Result<[&str; 3], TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    match parts.as_slice() {
        &[header, payload, signature] => Ok([header, payload, signature]),
        _ => Err(TokenError::SegmentCount(parts.len())),
    }
}

/// The only payload field validity depends on. `exp` may be an
/// integer or a float; every other field is ignored.
#[derive(Deserialize)]
struct Expiry {
    #[serde(default)]
    exp: Option<f64>,
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = crate::codec::decode(segment)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decodes the payload, reporting why it couldn't be read.
///
/// # Errors
/// - [`TokenError::SegmentCount`]: not exactly 3 `.`-separated segments
/// - [`TokenError::InvalidLength`] / [`TokenError::InvalidCharacter`]:
///   the payload segment isn't base64url
/// - [`TokenError::Json`]: the payload isn't a complete claims record
pub fn try_decode(token: &str) -> Result<Claims, TokenError> {
    let [_, payload, _] = segments(token)?;
    decode_segment(payload)
}

/// Decodes the payload, or `None` if the token can't be read.
///
/// ```rust
/// let token = loginkit_token::generate_token("jane.doe@example.com");
/// let claims = loginkit_token::decode(&token).unwrap();
/// assert_eq!(claims.name, "Jane Doe");
///
/// assert!(loginkit_token::decode("not-a-token").is_none());
/// ```
pub fn decode(token: &str) -> Option<Claims> {
    match try_decode(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "token payload could not be decoded");
            None
        }
    }
}

/// Decodes the header segment, or `None` if the token can't be read.
pub fn decode_header(token: &str) -> Option<Header> {
    segments(token)
        .and_then(|[header, _, _]| decode_segment(header))
        .ok()
}

/// Reads `exp` from the payload, or `None` if the token can't be read
/// or carries no numeric `exp`.
fn read_expiry(token: &str) -> Option<f64> {
    let expiry = segments(token).and_then(|[_, payload, _]| decode_segment::<Expiry>(payload));
    match expiry {
        Ok(expiry) => expiry.exp,
        Err(e) => {
            tracing::debug!(error = %e, "token expiry could not be read");
            None
        }
    }
}

/// `true` if there is a token, its payload has an `exp`, and `exp` is
/// still in the future.
pub fn is_valid(token: Option<&str>) -> bool {
    is_valid_at(token, unix_now())
}

/// [`is_valid`] against an explicit clock (seconds since epoch).
///
/// A token is still valid during the second *before* `exp`; at
/// `now == exp` it is expired.
pub fn is_valid_at(token: Option<&str>, now: i64) -> bool {
    token
        .and_then(read_expiry)
        .is_some_and(|exp| exp > now as f64)
}
