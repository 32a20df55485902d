// ============================================
// File: crates/hubcast-core/src/verify.rs
// ============================================
//! # Message Verification
//!
//! ## Creation Reason
//! Validates signed messages against the full protocol invariant before
//! they are trusted or relayed. The ordering of checks is part of the
//! security design, not an implementation detail.
//!
//! ## Main Functionality
//! - `verify_message_strict`: ordered precondition chain with typed errors
//! - `verify_message`: boolean convenience wrapper
//!
//! ## Verification Order
//! ```text
//! 1. Recompute hash' = BLAKE3(encode(data))[..20]
//!    Compare hash' to message.hash in CONSTANT TIME
//!         │ (hash-substitution defense)
//! 2. hash_scheme == BLAKE3 and signature_scheme == ED25519
//!         │ (scheme-confusion defense)
//! 3. Ed25519-verify signature over message.hash with message.signer
//! ```
//!
//! Skipping step 1 makes the verifier accept any data an attacker pairs
//! with a previously signed hash/signature/signer triple.
//!
//! ## ⚠️ Important Note for Next Developer
//! - The hash comparison uses `subtle::ConstantTimeEq`; do NOT replace
//!   it with `==` - an early-exit comparison reintroduces a timing side
//!   channel
//! - Each step short-circuits; later steps assume earlier ones passed
//!
//! ## Last Modified
//! v0.1.0 - Initial verifier implementation

use subtle::ConstantTimeEq;

use crate::crypto::hashing::hash_message_data;
use crate::crypto::keys::SignerPublicKey;
use crate::error::{CoreError, Result};
use crate::message::Message;
use crate::protocol::bodies::{HashScheme, SignatureScheme};

// ============================================
// Verification
// ============================================

/// Verifies a message, reporting which precondition failed.
///
/// # Errors
/// - `HashMismatch` if the recomputed content hash differs (or the data
///   cannot be encoded at all)
/// - `SchemeMismatch` if either scheme is not the accepted one
/// - `SignatureVerification` if the Ed25519 check fails
pub fn verify_message_strict(message: &Message) -> Result<()> {
    // 1. Recompute the content hash and compare in constant time.
    let recomputed = hash_message_data(message.data())?;
    let equal: bool = recomputed.as_bytes()[..]
        .ct_eq(&message.hash().as_bytes()[..])
        .into();
    if !equal {
        return Err(CoreError::HashMismatch);
    }

    // 2. Scheme checks.
    if message.hash_scheme() != HashScheme::Blake3 {
        return Err(CoreError::SchemeMismatch {
            field: "hash",
            got: message.hash_scheme().as_u64(),
        });
    }
    if message.signature_scheme() != SignatureScheme::Ed25519 {
        return Err(CoreError::SchemeMismatch {
            field: "signature",
            got: message.signature_scheme().as_u64(),
        });
    }

    // 3. Signature over the 20-byte hash.
    let signer = SignerPublicKey::from_bytes(message.signer())?;
    signer.verify(message.hash().as_bytes(), message.signature())
}

/// Verifies a message, returning a simple accept/reject.
#[must_use]
pub fn verify_message(message: &Message) -> bool {
    verify_message_strict(message).is_ok()
}

// ============================================
// Tests
// ============================================
