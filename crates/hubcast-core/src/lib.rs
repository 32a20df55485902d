// ============================================
// File: crates/hubcast-core/src/lib.rs
// ============================================
//! # Hubcast Core - Protocol & Cryptography Library
//!
//! ## Creation Reason
//! Provides the canonical wire encoding and cryptographic operations for
//! hub protocol messages. This crate is the security backbone of the
//! entire pipeline: every byte a hub accepts from us passes through it.
//!
//! ## Main Functionality
//!
//! ### Protocol Module ([`protocol`])
//! - Typed message bodies (`MessageData`, `MessageBody`, `CastAddBody`, ...)
//! - Deterministic tag/varint wire encoder (protobuf-wire-compatible subset)
//! - Scheme enums and protocol size constants
//!
//! ### Crypto Module ([`crypto`])
//! - Key types (`MessageSigner`, `SignerPublicKey`)
//! - BLAKE3 content hashing truncated to 20 bytes
//!
//! ### Message Assembly ([`message`]) and Verification ([`verify`])
//! - `Message::build`: encode → hash → sign, returning a read-only value
//! - `verify_message`: recompute-hash, scheme check, signature check
//!
//! ## Pipeline Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  MessageData ──encode──► bytes ──BLAKE3[..20]──► hash       │
//! │                                        │                    │
//! │                                   Ed25519 sign              │
//! │                                        │                    │
//! │                                        ▼                    │
//! │  Message { data, hash, signature, signer } ──► wire bytes   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Guarantees
//! - **Integrity**: content hash recomputed and compared on verification
//! - **Authenticity**: Ed25519 signature over the content hash
//! - **Substitution defense**: constant-time hash comparison before any
//!   signature check, so a validly-signed hash cannot be reused over
//!   different data
//!
//! ## ⚠️ Important Note for Next Developer
//! - ALL cryptographic code uses audited RustCrypto implementations
//! - NEVER implement custom crypto primitives
//! - Private keys MUST implement Zeroize for secure cleanup
//! - The wire encoder must stay byte-compatible with reference hubs;
//!   field numbers and omission rules are protocol, not style
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crypto;
pub mod error;
pub mod message;
pub mod protocol;
pub mod verify;

// Re-export commonly used items
pub use crypto::{hashing::hash_message_data, keys::MessageSigner, keys::SignerPublicKey};
pub use error::{CoreError, Result};
pub use message::Message;
pub use protocol::{
    CastAddBody, CastId, Embed, FarcasterNetwork, HashScheme, MessageBody, MessageData,
    MessageType, SignatureScheme,
};
pub use verify::{verify_message, verify_message_strict};
