// ============================================
// File: crates/hubcast-common/src/time.rs
// ============================================
//! # Protocol Time
//!
//! ## Creation Reason
//! The hub protocol does not use Unix time on the wire. Message
//! timestamps are 32-bit second counts measured from a custom epoch
//! (2021-01-01T00:00:00Z), which keeps encoded varints short for
//! decades to come. This module owns the conversion in both directions.
//!
//! ## Main Functionality
//! - `FARCASTER_EPOCH`: the protocol epoch as a Unix second count
//! - `FarcasterTime`: seconds since the protocol epoch, `u32` on the wire
//! - Integer-exact round trips between Unix and protocol time
//!
//! ## ⚠️ Important Note for Next Developer
//! - All timestamp arithmetic is integer seconds; no sub-second precision
//! - Times before the epoch (or past `u32::MAX` seconds after it) are
//!   errors, not silent wraparound
//! - `FARCASTER_EPOCH` is a wire-protocol constant shared with every hub
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol time implementation

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, Result};

// ============================================
// Constants
// ============================================

/// The protocol epoch: 2021-01-01T00:00:00Z as Unix seconds.
pub const FARCASTER_EPOCH: i64 = 1_609_459_200;

// ============================================
// FarcasterTime
// ============================================

/// A protocol timestamp: whole seconds since [`FARCASTER_EPOCH`].
///
/// # Wire Format
/// Encoded as a varint `u32` in message data. The 32-bit range covers
/// the epoch through the year 2157.
///
/// # Example
/// ```
/// use hubcast_common::time::{FarcasterTime, FARCASTER_EPOCH};
///
/// let t = FarcasterTime::from_unix(FARCASTER_EPOCH + 100).unwrap();
/// assert_eq!(t.as_secs(), 100);
/// assert_eq!(t.to_unix(), FARCASTER_EPOCH + 100);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct FarcasterTime(u32);

impl FarcasterTime {
    /// Creates a protocol timestamp from raw protocol seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Converts a Unix timestamp (seconds) into protocol time.
    ///
    /// # Errors
    /// Returns `InvalidTime` if `unix_secs` precedes the protocol epoch
    /// or lands beyond the representable `u32` range.
    pub fn from_unix(unix_secs: i64) -> Result<Self> {
        let offset = unix_secs - FARCASTER_EPOCH;
        if offset < 0 {
            return Err(CommonError::invalid_time(format!(
                "Unix time {unix_secs} precedes the protocol epoch {FARCASTER_EPOCH}"
            )));
        }
        u32::try_from(offset).map(Self).map_err(|_| {
            CommonError::invalid_time(format!(
                "Unix time {unix_secs} exceeds the representable protocol range"
            ))
        })
    }

    /// Returns the current protocol time.
    ///
    /// # Panics
    /// Panics if the system clock reports a time before the protocol
    /// epoch, which indicates a badly misconfigured host.
    #[must_use]
    pub fn now() -> Self {
        let unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System time before Unix epoch")
            .as_secs() as i64;
        Self::from_unix(unix).expect("System time before protocol epoch")
    }

    /// Returns the raw protocol second count.
    #[must_use]
    pub const fn as_secs(&self) -> u32 {
        self.0
    }

    /// Converts this protocol timestamp back to Unix seconds.
    ///
    /// Exact inverse of [`FarcasterTime::from_unix`] for all valid inputs.
    #[must_use]
    pub const fn to_unix(&self) -> i64 {
        self.0 as i64 + FARCASTER_EPOCH
    }
}

impl fmt::Display for FarcasterTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FarcasterTime {
    fn from(secs: u32) -> Self {
        Self(secs)
    }
}

impl From<FarcasterTime> for u32 {
    fn from(time: FarcasterTime) -> Self {
        time.0
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_maps_to_zero() {
        let t = FarcasterTime::from_unix(FARCASTER_EPOCH).unwrap();
        assert_eq!(t.as_secs(), 0);
    }

    #[test]
    fn test_unix_round_trip() {
        for unix in [
            FARCASTER_EPOCH,
            FARCASTER_EPOCH + 1,
            FARCASTER_EPOCH + 86_400,
            FARCASTER_EPOCH + i64::from(u32::MAX),
        ] {
            let t = FarcasterTime::from_unix(unix).unwrap();
            assert_eq!(t.to_unix(), unix);
        }
    }

    #[test]
    fn test_pre_epoch_rejected() {
        let result = FarcasterTime::from_unix(FARCASTER_EPOCH - 1);
        assert!(matches!(result, Err(CommonError::InvalidTime { .. })));

        // Unix epoch itself is long before the protocol epoch
        assert!(FarcasterTime::from_unix(0).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        let too_far = FARCASTER_EPOCH + i64::from(u32::MAX) + 1;
        assert!(FarcasterTime::from_unix(too_far).is_err());
    }

    #[test]
    fn test_now_is_sane() {
        let t = FarcasterTime::now();
        // This code was written well after 2021
        assert!(t.as_secs() > 0);
        assert!(t.to_unix() > FARCASTER_EPOCH);
    }

    #[test]
    fn test_json_is_transparent() {
        let t = FarcasterTime::from_secs(12_345);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "12345");
        let restored: FarcasterTime = serde_json::from_str(&json).unwrap();
        assert_eq!(t, restored);
    }
}
