// ============================================
// File: crates/hubcast-core/src/crypto/mod.rs
// ============================================
//! # Cryptography Module
//!
//! ## Creation Reason
//! Centralizes all cryptographic operations for the hub message
//! pipeline, using audited RustCrypto implementations.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`keys`]: Ed25519 key types (`MessageSigner`, `SignerPublicKey`)
//! - [`hashing`]: BLAKE3 content hashing truncated to 20 bytes
//!
//! ## Cryptographic Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Hash-then-Sign Pipeline                    │
//! │                                                             │
//! │   encode(data) ──► BLAKE3 ──► truncate to 20 bytes          │
//! │                                    │                        │
//! │                           Ed25519 sign(hash)                │
//! │                                    │                        │
//! │                                    ▼                        │
//! │               64-byte signature + 32-byte signer            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The signature covers the 20-byte hash, never the full encoding;
//! this is what makes the verifier's recompute-and-compare step a
//! mandatory part of the security story.
//!
//! ## ⚠️ Important Note for Next Developer
//! - ALL implementations use RustCrypto / official BLAKE3 (audited)
//! - NEVER roll your own crypto
//! - Private keys implement Zeroize
//! - The 20-byte truncation is a protocol constant, not configurable
//!
//! ## Last Modified
//! v0.1.0 - Initial crypto implementation

pub mod hashing;
pub mod keys;

// Re-export primary types at module level
pub use hashing::{hash_message_data, message_hash};
pub use keys::{MessageSigner, SignerPublicKey};

// ============================================
// Constants
// ============================================

/// Size of an Ed25519 public key (message signer) in bytes.
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// Size of an Ed25519 signature in bytes.
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// Size of an Ed25519 private key seed in bytes.
pub const ED25519_SEED_SIZE: usize = 32;
