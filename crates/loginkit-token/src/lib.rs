//! Unsigned session tokens for Loginkit.
//!
//! This crate defines what a token *is* and how to read one:
//!
//! - **Codec** ([`SegmentCodec`], [`encode`], [`decode`](codec::decode)):
//!   base64url for the three token segments, with a native and a
//!   dependency-free implementation.
//! - **Records** ([`Header`], [`Claims`]): the JSON carried in the
//!   first two segments.
//! - **Generator** ([`generate_token`], [`generate_token_with`]):
//!   builds `header.payload.signature` for an email address.
//! - **Decoder / validator** ([`decode`], [`try_decode`], [`is_valid`]):
//!   reads the payload without verification and checks expiry.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session layer (above)  ← decodes the stored token into the current user
//! Login layer (above)    ← generates a token on simulated success
//!     ↕
//! Token layer (this crate)
//! ```

mod claims;
mod clock;
pub mod codec;
mod config;
mod error;
mod generate;
mod validate;

pub use claims::{Claims, DEFAULT_TTL_SECS, Header};
pub use clock::unix_now;
pub use codec::{DefaultCodec, ManualCodec, SegmentCodec, encode};
#[cfg(feature = "native-base64")]
pub use codec::NativeCodec;
pub use config::TokenConfig;
pub use error::TokenError;
pub use generate::{display_name, generate_token, generate_token_with};
pub use validate::{decode, decode_header, is_valid, is_valid_at, try_decode};
