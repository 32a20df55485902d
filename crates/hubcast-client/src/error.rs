// ============================================
// File: crates/hubcast-client/src/error.rs
// ============================================
//! # Client Error Types
//!
//! ## Creation Reason
//! Defines the submission-side error taxonomy and the classification
//! rules that drive retry and failover decisions.
//!
//! ## Error Categories
//! 1. **Encoding errors**: programming errors, fail immediately
//! 2. **Network errors**: timeout, DNS, connect/reset - retryable
//! 3. **Hub rejections**: non-2xx with a hub-supplied reason - terminal
//! 4. **Exhaustion**: retry budget or hub list spent - terminal,
//!    carrying the last underlying cause
//!
//! ## ⚠️ Important Note for Next Developer
//! - `is_transient` IS the retry vocabulary from the protocol contract:
//!   timeout, connection reset/refused, DNS failure, HTTP 502/503/504,
//!   and explicit rate limiting. Nothing else gets retried
//! - `is_hub_error` additionally drives failover: it marks failures of
//!   the hub, as opposed to rejections of the data
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use hubcast_core::error::CoreError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

// ============================================
// ClientError
// ============================================

/// Error types for hub submission operations.
#[derive(Error, Debug)]
pub enum ClientError {
    // ========================================
    // Network Errors (transient)
    // ========================================

    /// Transport-level failure: timeout, DNS, connection reset/refused.
    #[error("Network error: {context}")]
    Network {
        /// What went wrong at the transport level
        context: String,
    },

    /// The hub answered but is temporarily unable to serve
    /// (HTTP 502/503/504, or 429 rate limiting).
    #[error("Hub unavailable: HTTP {status}")]
    Unavailable {
        /// The HTTP status received
        status: u16,
    },

    // ========================================
    // Hub Rejections (terminal)
    // ========================================

    /// The hub rejected the message (invalid signature, duplicate,
    /// unknown fid, ...). Carries the hub's reason verbatim.
    #[error("Hub rejected message: HTTP {status}: {reason}")]
    Rejected {
        /// The HTTP status received
        status: u16,
        /// Hub-supplied detail text
        reason: String,
    },

    // ========================================
    // Exhaustion (terminal)
    // ========================================

    /// Retry budget spent without success.
    #[error("Retries exhausted after {attempts} attempts")]
    Exhausted {
        /// Total attempts made (initial + retries)
        attempts: u32,
        /// Last underlying cause
        #[source]
        last: Box<ClientError>,
    },

    /// Every configured hub failed.
    #[error("No available hubs")]
    NoAvailableHubs {
        /// Last underlying cause, as reported by the final endpoint
        last: String,
    },

    // ========================================
    // Local Errors
    // ========================================

    /// Response body could not be parsed.
    #[error("Invalid hub response: {context}: {details}")]
    InvalidResponse {
        /// Which call produced the response
        context: String,
        /// Parse error details
        details: String,
    },

    /// Configuration is invalid.
    #[error("Invalid configuration for '{field}': {reason}")]
    Config {
        /// Configuration field at fault
        field: String,
        /// What is wrong with it
        reason: String,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Encoding/crypto error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `Config` error.
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidResponse` error.
    pub fn invalid_response(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidResponse {
            context: context.into(),
            details: details.into(),
        }
    }

    /// Classifies a transport error from `reqwest`.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let context = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            format!("transport failure: {err}")
        };
        Self::Network { context }
    }

    /// Classifies a non-2xx HTTP response.
    ///
    /// 502/503/504 and 429 are hub unavailability (transient); all
    /// other statuses are rejections carrying the hub's reason.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 | 502 | 503 | 504 => Self::Unavailable { status },
            _ => Self::Rejected {
                status,
                reason: if body.is_empty() {
                    "no detail provided".to_string()
                } else {
                    body
                },
            },
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this error is transient and worth retrying
    /// against the same hub.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Unavailable { .. })
    }

    /// Returns `true` if this error indicts the hub rather than the
    /// data, making failover to another hub worthwhile.
    ///
    /// Exhaustion counts: its cause chain is transient by construction.
    #[must_use]
    pub const fn is_hub_error(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Unavailable { .. } | Self::Exhausted { .. }
        )
    }

    /// Returns `true` if the hub rejected the message on data grounds.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

// ============================================
// Tests
// ============================================
