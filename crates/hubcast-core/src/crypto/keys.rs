// ============================================
// File: crates/hubcast-core/src/crypto/keys.rs
// ============================================
//! # Cryptographic Key Types
//!
//! ## Creation Reason
//! Defines the Ed25519 key types used to sign and verify hub messages,
//! with proper security properties (zeroization, redacted Debug).
//!
//! ## Main Functionality
//! - `MessageSigner`: Ed25519 signing key authorized for an account
//! - `SignerPublicKey`: verification half, safe to share and embed in
//!   messages
//!
//! ## Key Lifecycle
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  MessageSigner (caller-supplied)                           │
//! │  ├─ Loaded from a raw 32-byte seed per submission session  │
//! │  ├─ Signs 20-byte content hashes                           │
//! │  └─ Never persisted by this crate                          │
//! │                                                            │
//! │  SignerPublicKey (derived)                                 │
//! │  ├─ Embedded in every signed message (signer field)        │
//! │  └─ Used by hubs and the verifier to check signatures      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Private keys MUST be zeroized and never logged or serialized
//! - `Debug` for `MessageSigner` deliberately omits key material
//! - The signer key is an account-authorized key registered on-chain;
//!   this crate treats it as an opaque caller-supplied secret
//!
//! ## Last Modified
//! v0.1.0 - Initial key type definitions

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::{ED25519_PUBLIC_KEY_SIZE, ED25519_SEED_SIZE, ED25519_SIGNATURE_SIZE};
use crate::error::{CoreError, Result};
use hubcast_common::types::MessageHash;

// ============================================
// MessageSigner (Ed25519)
// ============================================

/// Ed25519 signing key used to author hub messages.
///
/// # Purpose
/// Signs the 20-byte content hash of a message, proving it was authored
/// by a key the account holder registered.
///
/// # Security
/// - Seed bytes are zeroed after key construction
/// - Never serialize the private key
/// - `generate` uses the OS random number generator
///
/// # Example
/// ```
/// use hubcast_core::crypto::MessageSigner;
/// use hubcast_common::types::MessageHash;
///
/// let signer = MessageSigner::generate();
/// let hash = MessageHash::from_array([0x42; 20]);
///
/// let signature = signer.sign(&hash);
/// assert!(signer.public_key().verify(hash.as_bytes(), &signature).is_ok());
/// ```
pub struct MessageSigner {
    /// Ed25519 signing key (private)
    signing_key: SigningKey,
}

impl MessageSigner {
    /// Generates a new random signer.
    ///
    /// Intended for tests and key provisioning tools; production
    /// signers are registered on-chain and supplied by the caller.
    #[must_use]
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Creates a signer from a raw 32-byte Ed25519 seed.
    ///
    /// # Errors
    /// Returns an error if `bytes` is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ED25519_SEED_SIZE {
            return Err(CoreError::key(format!(
                "Invalid Ed25519 seed size: expected {ED25519_SEED_SIZE}, got {}",
                bytes.len()
            )));
        }
        let mut seed = [0u8; ED25519_SEED_SIZE];
        seed.copy_from_slice(bytes);
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Ok(Self { signing_key })
    }

    /// Returns the public key component.
    #[must_use]
    pub fn public_key(&self) -> SignerPublicKey {
        SignerPublicKey(self.signing_key.verifying_key())
    }

    /// Returns the raw public key bytes (the message `signer` field).
    #[must_use]
    pub fn public_key_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_SIZE] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Signs a 20-byte content hash.
    ///
    /// The protocol signs the hash, never the full encoded message.
    #[must_use]
    pub fn sign(&self, hash: &MessageHash) -> [u8; ED25519_SIGNATURE_SIZE] {
        self.signing_key.sign(hash.as_bytes()).to_bytes()
    }
}

impl fmt::Debug for MessageSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print private key material
        f.debug_struct("MessageSigner")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

// ============================================
// SignerPublicKey
// ============================================

/// Public component of a message signer key.
///
/// Safe to share publicly; embedded verbatim in every signed message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SignerPublicKey(VerifyingKey);

impl SignerPublicKey {
    /// Creates a public key from raw bytes.
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid curve point.
    pub fn from_bytes(bytes: &[u8; ED25519_PUBLIC_KEY_SIZE]) -> Result<Self> {
        let key = VerifyingKey::from_bytes(bytes)
            .map_err(|_| CoreError::key("Invalid Ed25519 public key"))?;
        Ok(Self(key))
    }

    /// Returns the raw public key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_SIZE] {
        self.0.as_bytes()
    }

    /// Returns the raw public key bytes (owned).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Verifies a signature over `message` against this public key.
    ///
    /// # Errors
    /// Returns `SignatureVerification` if the signature does not check out.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &[u8; ED25519_SIGNATURE_SIZE],
    ) -> Result<()> {
        let sig = Signature::from_bytes(signature);
        self.0
            .verify(message, &sig)
            .map_err(|_| CoreError::SignatureVerification)
    }
}

impl fmt::Debug for SignerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show truncated hex for debugging
        let bytes = self.0.as_bytes();
        write!(
            f,
            "SignerPublicKey({:02x}{:02x}{:02x}{:02x}...)",
            bytes[0], bytes[1], bytes[2], bytes[3]
        )
    }
}

impl fmt::Display for SignerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0.as_bytes()))
    }
}

impl Serialize for SignerPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(self.0.as_bytes()))
        } else {
            serializer.serialize_bytes(self.0.as_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for SignerPublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            hex::decode(&s).map_err(serde::de::Error::custom)?
        } else {
            <Vec<u8>>::deserialize(deserializer)?
        };
        if bytes.len() != ED25519_PUBLIC_KEY_SIZE {
            return Err(serde::de::Error::invalid_length(bytes.len(), &"32 bytes"));
        }
        let mut arr = [0u8; ED25519_PUBLIC_KEY_SIZE];
        arr.copy_from_slice(&bytes);
        Self::from_bytes(&arr).map_err(serde::de::Error::custom)
    }
}

// ============================================
// Tests
// ============================================
