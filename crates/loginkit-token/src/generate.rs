//! Token generator: builds a structurally valid but unsigned token.
//!
//! The output looks exactly like a JWT and can be decoded by any JWT
//! tool, but the signature is random hex. Nothing can verify it, and
//! nothing is meant to.

use rand::Rng;

use crate::claims::{Claims, Header};
use crate::clock::unix_now;
use crate::codec::encode;
use crate::TokenConfig;

/// Alphabet for the random part of the subject id (base 36).
const SUB_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random characters after the `user_` prefix.
const SUB_SUFFIX_LEN: usize = 8;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Builds a token for `email` with default settings, the current time,
/// and the thread-local RNG.
///
/// The password is not an input: the caller has already validated it.
pub fn generate_token(email: &str) -> String {
    generate_token_with(
        email,
        &TokenConfig::default(),
        unix_now(),
        &mut rand::rng(),
    )
}

/// Builds a token with explicit settings, clock and random source.
///
/// Injecting `now` and `rng` makes the output fully reproducible in
/// tests (seed a `StdRng` and pass a fixed timestamp).
pub fn generate_token_with<R: Rng + ?Sized>(
    email: &str,
    config: &TokenConfig,
    now: i64,
    rng: &mut R,
) -> String {
    let config = config.clone().validated();

    let claims = Claims {
        sub: subject_id(rng),
        name: display_name(email),
        email: email.to_lowercase(),
        iat: now,
        exp: now.saturating_add(config.ttl_secs),
    };

    // Both records are plain strings and integers; serializing them
    // can't fail.
    let header = serde_json::to_vec(&Header::fixed())
        .expect("header serializes to JSON");
    let payload =
        serde_json::to_vec(&claims).expect("claims serialize to JSON");

    format!(
        "{}.{}.{}",
        encode(&header),
        encode(&payload),
        fake_signature(config.signature_len, rng)
    )
}

/// Derives a display name from the local part of an email.
///
/// `.`, `_` and `-` become spaces, then the first letter of every word
/// is uppercased. The rest of each word is left alone, so
/// `"JANE.DOE"` stays `"JANE DOE"`. An empty local part gives an
/// empty name.
///
/// ```rust
/// use loginkit_token::display_name;
///
/// assert_eq!(display_name("jane.doe@example.com"), "Jane Doe");
/// assert_eq!(display_name("mary-ann_smith@x.io"), "Mary Ann Smith");
/// ```
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut name = String::with_capacity(local.len());
    let mut prev_is_word = false;

    for ch in local.chars() {
        let ch = if matches!(ch, '.' | '_' | '-') { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();

        if is_word && !prev_is_word {
            name.push(ch.to_ascii_uppercase());
        } else {
            name.push(ch);
        }
        prev_is_word = is_word;
    }

    name
}

/// `user_` followed by 8 random base-36 characters.
///
/// 36^8 ≈ 2.8 × 10^12 possibilities. No collision check is made.
fn subject_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..SUB_SUFFIX_LEN)
        .map(|_| char::from(SUB_ALPHABET[rng.random_range(0..SUB_ALPHABET.len())]))
        .collect();
    format!("user_{suffix}")
}

/// `len` random lowercase hex characters. Not an HMAC.
fn fake_signature<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from(HEX[rng.random_range(0..HEX.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::try_decode;

    const NOW: i64 = 1_700_000_000;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_generate_token_has_three_non_empty_segments() {
        let token = generate_token("a@b.co");

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_generate_token_header_segment_is_fixed() {
        let token = generate_token("a@b.co");
        // base64url of {"alg":"HS256","typ":"JWT"}
        assert!(token.starts_with("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9."));
    }

    #[test]
    fn test_generate_token_signature_is_32_hex_chars() {
        let token = generate_token("a@b.co");
        let signature = token.rsplit('.').next().unwrap();

        assert_eq!(signature.len(), 32);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!signature.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_token_with_jane_doe_scenario() {
        let token = generate_token_with(
            "Jane.Doe@Example.com",
            &TokenConfig::default(),
            NOW,
            &mut seeded(),
        );

        let claims = try_decode(&token).expect("should decode");
        assert_eq!(claims.name, "Jane Doe");
        assert_eq!(claims.email, "jane.doe@example.com");
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 86_400);
    }

    #[test]
    fn test_generate_token_with_same_seed_is_reproducible() {
        let config = TokenConfig::default();
        let a = generate_token_with("x@y.z", &config, NOW, &mut seeded());
        let b = generate_token_with("x@y.z", &config, NOW, &mut seeded());
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_token_with_custom_ttl_and_signature_len() {
        let config = TokenConfig {
            ttl_secs: 60,
            signature_len: 8,
        };
        let token = generate_token_with("x@y.z", &config, NOW, &mut seeded());

        let claims = try_decode(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 60);
        assert_eq!(token.rsplit('.').next().unwrap().len(), 8);
    }

    #[test]
    fn test_subject_id_format() {
        let sub = subject_id(&mut seeded());

        let suffix = sub.strip_prefix("user_").expect("prefix");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_display_name_replaces_separators_and_capitalizes() {
        assert_eq!(display_name("john_smith@x.com"), "John Smith");
        assert_eq!(display_name("a.b-c_d@x.com"), "A B C D");
        assert_eq!(display_name("alice@x.com"), "Alice");
    }

    #[test]
    fn test_display_name_keeps_existing_case() {
        assert_eq!(display_name("JANE.DOE@x.com"), "JANE DOE");
        assert_eq!(display_name("mcDonald@x.com"), "McDonald");
    }

    #[test]
    fn test_display_name_capitalizes_after_digits_boundary_only() {
        // Digits are word characters: "2nd" has no boundary before "n".
        assert_eq!(display_name("agent.2nd@x.com"), "Agent 2nd");
        assert_eq!(display_name("o'brien@x.com"), "O'Brien");
    }

    #[test]
    fn test_display_name_empty_local_part_is_empty() {
        assert_eq!(display_name("@example.com"), "");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_display_name_without_at_uses_whole_input() {
        assert_eq!(display_name("jane.doe"), "Jane Doe");
    }

    #[test]
    fn test_generate_token_with_now_near_max_saturates_exp() {
        let token = generate_token_with(
            "x@y.z",
            &TokenConfig::default(),
            i64::MAX - 10,
            &mut seeded(),
        );

        let claims = try_decode(&token).unwrap();
        assert_eq!(claims.exp, i64::MAX);
        assert!(claims.exp > claims.iat);
    }
}
