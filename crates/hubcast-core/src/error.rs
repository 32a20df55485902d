// ============================================
// File: crates/hubcast-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines error types specific to protocol encoding and cryptographic
//! operations in the hubcast core crate.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for core operations
//! - Classification predicates used by callers and the submission layer
//!
//! ## Error Categories
//! 1. **Crypto Errors**: Key handling, signing, verification failures
//! 2. **Encoding Errors**: Unsupported bodies, type/body mismatch
//! 3. **Verification Errors**: Hash/scheme/signature check failures
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER include key material in error messages
//! - Encoding errors are programming errors: the submission client must
//!   fail them immediately and never burn retry budget on them
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use hubcast_common::error::CommonError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for protocol and cryptographic operations.
///
/// # Security Note
/// Error messages are designed to be informative for debugging
/// without revealing sensitive information like key material.
#[derive(Error, Debug)]
pub enum CoreError {
    // ========================================
    // Cryptographic Errors
    // ========================================

    /// Failed to construct a cryptographic key.
    #[error("Key error: {context}")]
    Key {
        /// What key operation failed
        context: String,
    },

    /// Signature verification failed.
    #[error("Signature verification failed")]
    SignatureVerification,

    // ========================================
    // Encoding Errors
    // ========================================

    /// The body variant is declared in the data model but has no wire
    /// encoding (protocol subset boundary).
    #[error("Unsupported body variant: {body}")]
    UnsupportedBody {
        /// Name of the rejected body variant
        body: &'static str,
    },

    /// The message type does not select the supplied body variant.
    #[error("Body mismatch: type {message_type} does not carry a {body} body")]
    BodyMismatch {
        /// The declared message type
        message_type: &'static str,
        /// The supplied body variant
        body: &'static str,
    },

    // ========================================
    // Verification Errors
    // ========================================

    /// Recomputed content hash differs from the embedded hash.
    #[error("Hash mismatch: message data does not hash to the embedded hash")]
    HashMismatch,

    /// Message declares a scheme this pipeline does not accept.
    #[error("Scheme mismatch: unexpected {field} scheme {got}")]
    SchemeMismatch {
        /// Which scheme field was wrong ("hash" or "signature")
        field: &'static str,
        /// The raw scheme value received
        got: u64,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Error from the common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `Key` error.
    pub fn key(context: impl Into<String>) -> Self {
        Self::Key {
            context: context.into(),
        }
    }

    /// Creates an `UnsupportedBody` error.
    #[must_use]
    pub const fn unsupported_body(body: &'static str) -> Self {
        Self::UnsupportedBody { body }
    }

    /// Creates a `BodyMismatch` error.
    #[must_use]
    pub const fn body_mismatch(message_type: &'static str, body: &'static str) -> Self {
        Self::BodyMismatch { message_type, body }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this is a cryptographic error.
    ///
    /// Crypto errors might indicate an attack or implementation bug.
    #[must_use]
    pub const fn is_crypto_error(&self) -> bool {
        matches!(self, Self::Key { .. } | Self::SignatureVerification)
    }

    /// Returns `true` if this is an encoding error.
    ///
    /// Encoding errors are caller mistakes; they are terminal and must
    /// never be retried.
    #[must_use]
    pub const fn is_encoding_error(&self) -> bool {
        matches!(self, Self::UnsupportedBody { .. } | Self::BodyMismatch { .. })
    }

    /// Returns `true` if this error might indicate tampering.
    ///
    /// These errors warrant additional logging/monitoring.
    #[must_use]
    pub const fn is_suspicious(&self) -> bool {
        matches!(
            self,
            Self::SignatureVerification | Self::HashMismatch | Self::SchemeMismatch { .. }
        )
    }
}

// ============================================
// Tests
// ============================================
