//! The two JSON records carried inside a token.
//!
//! ```text
//! base64url(Header) . base64url(Claims) . random-hex
//! ```

use serde::{Deserialize, Serialize};

/// Token lifetime: 24 hours.
pub const DEFAULT_TTL_SECS: i64 = 60 * 60 * 24;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// The first token segment. Always `{"alg":"HS256","typ":"JWT"}`.
///
/// The `alg` is a claim about the format, not a promise: the signature
/// segment is random filler and nothing ever verifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

impl Header {
    /// The header every generated token carries.
    pub fn fixed() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// The decoded middle segment: who the token is for and when it expires.
///
/// Produced once by the generator and never mutated afterwards. Every
/// field is required here: a payload missing any of them doesn't decode
/// into a user, even when its `exp` alone keeps the token valid.
///
/// Field order matches the wire order, since `serde_json` serializes
/// struct fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Synthetic subject id, e.g. `user_k3x9a0qz`. Not globally unique.
    pub sub: String,
    /// Display name derived from the email's local part.
    pub name: String,
    /// Lowercased email address.
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// Seconds left until expiry at `now`, or 0 if already expired.
    ///
    /// Saturates instead of overflowing, since `exp` may come from a
    /// foreign token.
    pub fn remaining_secs_at(&self, now: i64) -> i64 {
        self.exp.saturating_sub(now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat: i64) -> Claims {
        Claims {
            sub: "user_abc".into(),
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            iat,
            exp: iat + DEFAULT_TTL_SECS,
        }
    }

    #[test]
    fn test_header_fixed_serializes_in_wire_order() {
        let json = serde_json::to_string(&Header::fixed()).unwrap();
        assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn test_claims_serialize_in_wire_order() {
        let json = serde_json::to_string(&claims(100)).unwrap();
        assert_eq!(
            json,
            r#"{"sub":"user_abc","name":"Jane Doe","email":"jane@example.com","iat":100,"exp":86500}"#
        );
    }

    #[test]
    fn test_remaining_secs_never_negative() {
        let c = claims(1_000);
        assert_eq!(c.remaining_secs_at(c.iat), DEFAULT_TTL_SECS);
        assert_eq!(c.remaining_secs_at(c.exp + 50), 0);
    }

    #[test]
    fn test_remaining_secs_extreme_exp_saturates() {
        let mut c = claims(1_000);
        c.exp = i64::MIN;
        assert_eq!(c.remaining_secs_at(1_700_000_000), 0);

        c.exp = i64::MAX;
        assert_eq!(c.remaining_secs_at(-1), i64::MAX);
    }
}
