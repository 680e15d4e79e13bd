//! Base64url codec for token segments.
//!
//! Every token segment is base64url text: the standard base64 alphabet
//! with `+` → `-`, `/` → `_`, and the trailing `=` padding stripped.
//!
//! Two implementations sit behind the [`SegmentCodec`] trait:
//!
//! - [`NativeCodec`] delegates to the `base64` crate (behind the
//!   `native-base64` feature, enabled by default).
//! - [`ManualCodec`] is a dependency-free byte-chunking fallback, used
//!   when the feature is off.
//!
//! Both produce byte-identical output and share the same input
//! normalization, so they accept and reject exactly the same strings.
//! The crate-level [`encode`] / [`decode`] functions use
//! [`DefaultCodec`], whichever of the two is compiled in.

use crate::TokenError;

/// The standard base64 alphabet. Index = 6-bit value.
const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Marker for a `=` padding character in a decoded sextet.
const PAD: u8 = 64;

/// Converts bytes to base64url text and back.
///
/// `Send + Sync + 'static` so a codec can live inside long-lived
/// async tasks, same as the other pluggable pieces in Loginkit.
pub trait SegmentCodec: Send + Sync + 'static {
    /// Encodes bytes as unpadded base64url.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decodes base64url (padded or not) back into bytes.
    ///
    /// # Errors
    /// - [`TokenError::InvalidLength`]: `len % 4 == 1` after stripping padding
    /// - [`TokenError::InvalidCharacter`]: a character outside the alphabet
    fn decode(&self, input: &str) -> Result<Vec<u8>, TokenError>;
}

#[cfg(feature = "native-base64")]
pub type DefaultCodec = NativeCodec;
#[cfg(not(feature = "native-base64"))]
pub type DefaultCodec = ManualCodec;

/// Encodes bytes with [`DefaultCodec`].
///
/// ```rust
/// assert_eq!(loginkit_token::encode(b"hi?"), "aGk_");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    DefaultCodec::default().encode(bytes)
}

/// Decodes base64url text with [`DefaultCodec`].
///
/// # Errors
/// See [`SegmentCodec::decode`].
pub fn decode(input: &str) -> Result<Vec<u8>, TokenError> {
    DefaultCodec::default().decode(input)
}

/// Rewrites base64url into padded standard base64, validating as it goes.
///
/// Accepts both alphabets (`-`/`+`, `_`/`/`) and tolerates existing
/// trailing padding, then re-pads to the next multiple of 4.
fn to_standard(input: &str) -> Result<String, TokenError> {
    let trimmed = input.trim_end_matches('=');
    if trimmed.len() % 4 == 1 {
        return Err(TokenError::InvalidLength(trimmed.len()));
    }

    let mut out = String::with_capacity(trimmed.len() + 3);
    for (index, ch) in trimmed.char_indices() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' => out.push(ch),
            '-' | '+' => out.push('+'),
            '_' | '/' => out.push('/'),
            _ => return Err(TokenError::InvalidCharacter { ch, index }),
        }
    }
    while out.len() % 4 != 0 {
        out.push('=');
    }
    Ok(out)
}

/// Turns standard base64 into base64url by swapping the two symbols
/// and dropping the padding.
fn to_url_safe(standard: &str) -> String {
    standard
        .chars()
        .filter(|&c| c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// NativeCodec
// ---------------------------------------------------------------------------

/// A [`SegmentCodec`] backed by the `base64` crate.
#[cfg(feature = "native-base64")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

/// Standard alphabet, canonical padding, but lenient about non-zero
/// trailing bits so it agrees with [`ManualCodec`] on every input.
#[cfg(feature = "native-base64")]
const LENIENT_STANDARD: base64::engine::GeneralPurpose =
    base64::engine::GeneralPurpose::new(
        &base64::alphabet::STANDARD,
        base64::engine::GeneralPurposeConfig::new()
            .with_decode_allow_trailing_bits(true),
    );

#[cfg(feature = "native-base64")]
impl SegmentCodec for NativeCodec {
    fn encode(&self, bytes: &[u8]) -> String {
        use base64::Engine as _;
        to_url_safe(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    fn decode(&self, input: &str) -> Result<Vec<u8>, TokenError> {
        use base64::Engine as _;
        let standard = to_standard(input)?;
        LENIENT_STANDARD
            .decode(standard)
            .map_err(TokenError::Base64)
    }
}

// ---------------------------------------------------------------------------
// ManualCodec
// ---------------------------------------------------------------------------

/// A [`SegmentCodec`] with no dependencies: walks the input 3 bytes
/// (encode) or 4 characters (decode) at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualCodec;

impl SegmentCodec for ManualCodec {
    fn encode(&self, bytes: &[u8]) -> String {
        let mut standard = String::with_capacity(bytes.len().div_ceil(3) * 4);

        for chunk in bytes.chunks(3) {
            let b0 = chunk[0];
            let b1 = chunk.get(1).copied().unwrap_or(0);
            let b2 = chunk.get(2).copied().unwrap_or(0);

            standard.push(ALPHABET[usize::from(b0 >> 2)] as char);
            standard.push(
                ALPHABET[usize::from(((b0 & 0b11) << 4) | (b1 >> 4))] as char,
            );
            if chunk.len() > 1 {
                standard.push(
                    ALPHABET[usize::from(((b1 & 0b1111) << 2) | (b2 >> 6))]
                        as char,
                );
            }
            if chunk.len() > 2 {
                standard.push(ALPHABET[usize::from(b2 & 0b11_1111)] as char);
            }
        }

        to_url_safe(&standard)
    }

    fn decode(&self, input: &str) -> Result<Vec<u8>, TokenError> {
        let standard = to_standard(input)?;
        let mut out = Vec::with_capacity(standard.len() / 4 * 3);

        // `to_standard` guarantees a multiple of 4 and a valid alphabet.
        for group in standard.as_bytes().chunks_exact(4) {
            let [a, b, c, d] = [group[0], group[1], group[2], group[3]]
                .map(sextet);

            out.push((a << 2) | (b >> 4));
            if c != PAD {
                out.push(((b & 0b1111) << 4) | (c >> 2));
            }
            if d != PAD {
                out.push(((c & 0b11) << 6) | d);
            }
        }

        Ok(out)
    }
}

fn sextet(symbol: u8) -> u8 {
    match symbol {
        b'A'..=b'Z' => symbol - b'A',
        b'a'..=b'z' => symbol - b'a' + 26,
        b'0'..=b'9' => symbol - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => PAD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printable_ascii() -> Vec<String> {
        let all: String = (0x20u8..0x7f).map(char::from).collect();
        let mut samples = vec![
            String::new(),
            "a".into(),
            "ab".into(),
            "abc".into(),
            "hello world".into(),
            r#"{"alg":"HS256","typ":"JWT"}"#.into(),
        ];
        // Every length from 0..=95 exercises all three padding cases.
        samples.extend((0..=all.len()).map(|n| all[..n].to_string()));
        samples
    }

    #[test]
    fn test_encode_strips_padding_and_uses_url_alphabet() {
        // "hi?" → standard "aGk/" ; ">>>" → "Pj4+"
        assert_eq!(ManualCodec.encode(b"hi?"), "aGk_");
        assert_eq!(ManualCodec.encode(b">>>"), "Pj4-");
        assert_eq!(ManualCodec.encode(b"a"), "YQ");
        assert_eq!(ManualCodec.encode(b"ab"), "YWI");
        assert_eq!(ManualCodec.encode(b""), "");
    }

    #[test]
    fn test_manual_roundtrip_printable_ascii() {
        for s in printable_ascii() {
            let encoded = ManualCodec.encode(s.as_bytes());
            let decoded = ManualCodec.decode(&encoded).expect("should decode");
            assert_eq!(decoded, s.as_bytes(), "roundtrip failed for {s:?}");
        }
    }

    #[cfg(feature = "native-base64")]
    #[test]
    fn test_native_and_manual_agree_on_printable_ascii() {
        for s in printable_ascii() {
            let native = NativeCodec.encode(s.as_bytes());
            let manual = ManualCodec.encode(s.as_bytes());
            assert_eq!(native, manual, "encoders disagree on {s:?}");
            assert_eq!(
                NativeCodec.decode(&native).expect("native decode"),
                ManualCodec.decode(&manual).expect("manual decode"),
            );
        }
    }

    #[cfg(feature = "native-base64")]
    #[test]
    fn test_native_and_manual_agree_on_non_canonical_trailing_bits() {
        // "YR" has non-zero low bits in its last symbol.
        assert_eq!(
            NativeCodec.decode("YR").expect("native"),
            ManualCodec.decode("YR").expect("manual"),
        );
    }

    #[test]
    fn test_decode_accepts_padded_and_standard_alphabet() {
        assert_eq!(ManualCodec.decode("aGk/").unwrap(), b"hi?");
        assert_eq!(ManualCodec.decode("YQ==").unwrap(), b"a");
        assert_eq!(decode("Pj4-").unwrap(), b">>>");
    }

    #[test]
    fn test_decode_single_leftover_char_returns_invalid_length() {
        let result = decode("YWJjZ");
        assert!(
            matches!(result, Err(TokenError::InvalidLength(5))),
            "got {result:?}"
        );
    }

    #[test]
    fn test_decode_char_outside_alphabet_returns_invalid_character() {
        let result = ManualCodec.decode("ab*d");
        assert!(
            matches!(
                result,
                Err(TokenError::InvalidCharacter { ch: '*', index: 2 })
            ),
            "got {result:?}"
        );
    }

    #[test]
    fn test_decode_padding_in_the_middle_is_rejected() {
        assert!(decode("YQ==YQ").is_err());
    }
}
