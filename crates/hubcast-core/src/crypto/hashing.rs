// ============================================
// File: crates/hubcast-core/src/crypto/hashing.rs
// ============================================
//! # Content Hashing
//!
//! ## Creation Reason
//! Computes the message content hash that identifies every message on
//! the hub network and is the value the signature covers.
//!
//! ## Main Functionality
//! - `message_hash`: BLAKE3 over encoded bytes, truncated to 20 bytes
//! - `hash_message_data`: encode-then-hash convenience over `MessageData`
//!
//! ## ⚠️ Important Note for Next Developer
//! - The 20-byte truncation is a fixed protocol constant, not a knob
//! - Hash stability depends entirely on encoder determinism; if the
//!   encoder ever diverges from the reference, hashes (and therefore
//!   message IDs) diverge with it
//!
//! ## Last Modified
//! v0.1.0 - Initial hashing implementation

use hubcast_common::types::{MessageHash, MESSAGE_HASH_SIZE};

use crate::error::Result;
use crate::protocol::bodies::MessageData;
use crate::protocol::wire::encode_message_data;

// ============================================
// Hash Functions
// ============================================

/// Computes the truncated BLAKE3 content hash of already-encoded bytes.
///
/// Always exactly [`MESSAGE_HASH_SIZE`] (20) bytes.
#[must_use]
pub fn message_hash(encoded: &[u8]) -> MessageHash {
    let digest = blake3::hash(encoded);
    let mut truncated = [0u8; MESSAGE_HASH_SIZE];
    truncated.copy_from_slice(&digest.as_bytes()[..MESSAGE_HASH_SIZE]);
    MessageHash::from_array(truncated)
}

/// Encodes message data canonically and hashes the result.
///
/// # Errors
/// Propagates encoder errors (e.g. an unsupported body variant).
pub fn hash_message_data(data: &MessageData) -> Result<MessageHash> {
    Ok(message_hash(&encode_message_data(data)?))
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::bodies::{
        CastAddBody, FarcasterNetwork, MessageBody, MessageType,
    };
    use hubcast_common::time::FarcasterTime;
    use hubcast_common::types::Fid;

    fn cast_add(text: &str) -> MessageData {
        MessageData::new(
            MessageType::CastAdd,
            Fid::new(123),
            FarcasterTime::from_secs(1_000),
            FarcasterNetwork::Mainnet,
            MessageBody::CastAdd(CastAddBody::from_text(text)),
        )
        .unwrap()
    }

    #[test]
    fn test_hash_is_twenty_bytes() {
        let hash = message_hash(b"arbitrary input");
        assert_eq!(hash.as_bytes().len(), MESSAGE_HASH_SIZE);
    }

    #[test]
    fn test_hash_is_stable() {
        let data = cast_add("hello");
        let h1 = hash_message_data(&data).unwrap();
        let h2 = hash_message_data(&data).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_hash_is_blake3_prefix() {
        let input = b"prefix check";
        let full = blake3::hash(input);
        let truncated = message_hash(input);
        assert_eq!(truncated.as_bytes()[..], full.as_bytes()[..MESSAGE_HASH_SIZE]);
    }

    #[test]
    fn test_different_data_different_hash() {
        let h1 = hash_message_data(&cast_add("hello")).unwrap();
        let h2 = hash_message_data(&cast_add("hello!")).unwrap();
        assert_ne!(h1, h2);
    }
}
