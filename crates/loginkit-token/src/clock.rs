//! Wall-clock helper. Token timestamps are whole seconds since the Unix epoch.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time in seconds since the Unix epoch.
///
/// A clock set before 1970 reads as 0, which makes every token look
/// expired rather than panicking.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
