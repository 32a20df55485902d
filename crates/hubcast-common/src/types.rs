// ============================================
// File: crates/hubcast-common/src/types.rs
// ============================================
//! # Core Type Definitions
//!
//! ## Creation Reason
//! Centralizes fundamental identifier types used throughout the Hubcast
//! pipeline, ensuring type safety and consistent representations.
//!
//! ## Main Functionality
//! - `Fid`: numeric account identifier on the social graph
//! - `MessageHash`: truncated 20-byte content hash identifying a message
//! - Type conversions and serialization implementations
//!
//! ## Main Logical Flow
//! 1. Callers construct `Fid` values from registry lookups
//! 2. `MessageHash` values are produced by the hashing engine
//! 3. Both serialize to human-readable forms for JSON APIs and logs
//!
//! ## ⚠️ Important Note for Next Developer
//! - `MessageHash` is exactly 20 bytes - a protocol constant, not a knob
//! - Hex is the canonical human-readable form (hubs use `0x`-less hex)
//! - Maintain backward-compatible serialization formats
//!
//! ## Last Modified
//! v0.1.0 - Initial type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================
// Constants
// ============================================

/// Size of a message hash in bytes (BLAKE3 truncated per protocol rule).
pub const MESSAGE_HASH_SIZE: usize = 20;

// ============================================
// Fid
// ============================================

/// Numeric identifier of a protocol account (Farcaster ID).
///
/// # Purpose
/// Wraps `u64` to prevent confusion with other numeric values flowing
/// through the pipeline (timestamps, counters, field numbers).
///
/// # Example
/// ```
/// use hubcast_common::types::Fid;
///
/// let fid = Fid::new(123);
/// assert_eq!(fid.value(), 123);
/// assert_eq!(fid.to_string(), "123");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Fid(u64);

impl Fid {
    /// Creates a new `Fid` from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw FID value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Checks whether this FID is registered-range valid.
    ///
    /// FID 0 is reserved and never assigned by the ID registry.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Fid {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Fid> for u64 {
    fn from(fid: Fid) -> Self {
        fid.0
    }
}

// ============================================
// MessageHash Error Type
// ============================================

/// Error type for `MessageHash` parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MessageHashError {
    /// Hex decoding failed.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    /// Decoded bytes have wrong length.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
}

// ============================================
// MessageHash
// ============================================

/// Truncated content hash identifying a message on the hub network.
///
/// # Wire Format
/// ```text
/// ┌────────────────────────────────────┐
/// │     Message hash (20 bytes)        │
/// │  BLAKE3(encode(data))[0..20]       │
/// └────────────────────────────────────┘
/// ```
///
/// The hash doubles as the logical message ID: hubs key storage and
/// gossip on it, and `CastId` references embed it.
///
/// # Example
/// ```
/// use hubcast_common::types::MessageHash;
///
/// let hash = MessageHash::from_bytes(&[0xab; 20]).unwrap();
/// let restored: MessageHash = hash.to_string().parse().unwrap();
/// assert_eq!(hash, restored);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHash([u8; MESSAGE_HASH_SIZE]);

impl MessageHash {
    /// Creates a `MessageHash` from raw bytes.
    ///
    /// # Returns
    /// - `Some(MessageHash)` if `bytes` is exactly 20 bytes
    /// - `None` otherwise
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != MESSAGE_HASH_SIZE {
            return None;
        }
        let mut hash = [0u8; MESSAGE_HASH_SIZE];
        hash.copy_from_slice(bytes);
        Some(Self(hash))
    }

    /// Creates a `MessageHash` from an owned array.
    #[must_use]
    pub const fn from_array(bytes: [u8; MESSAGE_HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw hash bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MESSAGE_HASH_SIZE] {
        &self.0
    }

    /// Returns the hash as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncated hex keeps log lines readable
        write!(
            f,
            "MessageHash({:02x}{:02x}{:02x}{:02x}...)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl fmt::Display for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for MessageHash {
    type Err = MessageHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| MessageHashError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes).ok_or(MessageHashError::InvalidLength {
            expected: MESSAGE_HASH_SIZE,
            actual: bytes.len(),
        })
    }
}

impl Serialize for MessageHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(self.0))
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for MessageHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Self::from_bytes(&bytes)
                .ok_or_else(|| serde::de::Error::invalid_length(bytes.len(), &"20 bytes"))
        }
    }
}

impl AsRef<[u8]> for MessageHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fid_basics() {
        let fid = Fid::new(42);
        assert_eq!(fid.value(), 42);
        assert!(fid.is_valid());
        assert!(!Fid::new(0).is_valid());
    }

    #[test]
    fn test_message_hash_roundtrip() {
        let original = MessageHash::from_array([0x5a; MESSAGE_HASH_SIZE]);

        // Byte roundtrip
        let restored = MessageHash::from_bytes(original.as_bytes()).unwrap();
        assert_eq!(original, restored);

        // Hex string roundtrip
        let s = original.to_string();
        assert_eq!(s.len(), MESSAGE_HASH_SIZE * 2);
        let parsed: MessageHash = s.parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_message_hash_invalid_length() {
        assert!(MessageHash::from_bytes(&[0u8; 8]).is_none());
        assert!(MessageHash::from_bytes(&[0u8; 32]).is_none());

        let err = "abcd".parse::<MessageHash>();
        assert!(matches!(err, Err(MessageHashError::InvalidLength { .. })));
    }

    #[test]
    fn test_message_hash_invalid_hex() {
        let err = "zz".repeat(20).parse::<MessageHash>();
        assert!(matches!(err, Err(MessageHashError::InvalidHex(_))));
    }

    #[test]
    fn test_message_hash_json_serialization() {
        let original = MessageHash::from_array([0x11; MESSAGE_HASH_SIZE]);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, format!("\"{}\"", "11".repeat(20)));
        let restored: MessageHash = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
