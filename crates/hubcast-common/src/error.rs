// ============================================
// File: crates/hubcast-common/src/error.rs
// ============================================
//! # Common Error Types
//!
//! ## Creation Reason
//! Provides foundational error types and result aliases used across
//! all Hubcast crates, enabling consistent error handling.
//!
//! ## Main Functionality
//! - `CommonError`: Base error enum for common operations
//! - `Result<T>`: Type alias using `CommonError`
//! - Classification predicates consumed by the submission retry policy
//!
//! ## Design Philosophy
//! - Use `thiserror` for ergonomic error definitions
//! - Each crate may define its own error types that wrap `CommonError`
//! - Errors should be informative without leaking sensitive information
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never include key material in error messages
//! - Keep error variants specific but not too granular
//! - Implement `From` traits for seamless error propagation
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Common result type for operations that may fail.
pub type Result<T> = std::result::Result<T, CommonError>;

// ============================================
// CommonError
// ============================================

/// Common error types shared across Hubcast crates.
///
/// # Categories
/// - **Validation**: Input validation failures
/// - **Time**: Protocol timestamp failures
/// - **Internal**: Unexpected internal state
///
/// # Example
/// ```
/// use hubcast_common::error::{CommonError, Result};
///
/// fn validate_input(data: &[u8]) -> Result<()> {
///     if data.is_empty() {
///         return Err(CommonError::InvalidInput {
///             field: "data".into(),
///             reason: "cannot be empty".into(),
///         });
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum CommonError {
    // ========================================
    // Validation Errors
    // ========================================

    /// Invalid input data provided.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the field or parameter
        field: String,
        /// Description of what's wrong
        reason: String,
    },

    /// Data length doesn't match expected size.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length received
        actual: usize,
    },

    // ========================================
    // Time Errors
    // ========================================

    /// Protocol timestamp is invalid.
    #[error("Invalid protocol time: {reason}")]
    InvalidTime {
        /// Why the timestamp is invalid
        reason: String,
    },

    /// Operation timed out.
    #[error("Operation timed out: {operation} after {duration_ms}ms")]
    Timeout {
        /// What operation timed out
        operation: String,
        /// How long we waited
        duration_ms: u64,
    },

    // ========================================
    // Internal Errors
    // ========================================

    /// Internal error (bug or unexpected condition).
    #[error("Internal error: {message}")]
    Internal {
        /// Description of what went wrong
        message: String,
    },
}

impl CommonError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidLength` error.
    #[must_use]
    pub const fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    /// Creates an `InvalidTime` error.
    pub fn invalid_time(reason: impl Into<String>) -> Self {
        Self::InvalidTime {
            reason: reason.into(),
        }
    }

    /// Creates a `Timeout` error.
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this error is retryable.
    ///
    /// Retryable errors are transient and the operation might
    /// succeed if attempted again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this error indicates a caller mistake.
    ///
    /// Client errors are caused by invalid input, not by transient
    /// conditions, and must never be retried.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::InvalidLength { .. } | Self::InvalidTime { .. }
        )
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CommonError::invalid_input("fid", "must be non-zero");
        assert!(err.to_string().contains("fid"));
        assert!(err.to_string().contains("non-zero"));
    }

    #[test]
    fn test_error_classification() {
        let client_err = CommonError::invalid_input("field", "bad");
        assert!(client_err.is_client_error());
        assert!(!client_err.is_retryable());

        let retryable = CommonError::timeout("submit", 10_000);
        assert!(retryable.is_retryable());
        assert!(!retryable.is_client_error());

        let internal = CommonError::internal("bug");
        assert!(!internal.is_client_error());
        assert!(!internal.is_retryable());
    }

    #[test]
    fn test_length_error_display() {
        let err = CommonError::invalid_length(20, 32);
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("32"));
    }
}
