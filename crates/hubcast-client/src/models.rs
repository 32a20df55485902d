// ============================================
// File: crates/hubcast-client/src/models.rs
// ============================================
//! # Hub API Data Models
//!
//! ## Creation Reason
//! Defines the JSON models exchanged with hub HTTP APIs and the value
//! type every submission resolves to.
//!
//! ## Main Data Structures
//! - `HubInfo`: metadata from `GET /v1/info` (camelCase JSON)
//! - `ValidationOutcome`: result of `POST /v1/validateMessage`
//! - `SubmitResult`: value-typed outcome of a submission attempt
//!
//! ## ⚠️ Important Note for Next Developer
//! - Hub JSON uses camelCase field names; keep the serde renames
//! - `SubmitResult.retries` counts retries, not attempts: a first-try
//!   success reports 0
//!
//! ## Last Modified
//! v0.1.0 - Initial model definitions

use serde::{Deserialize, Serialize};

// ============================================
// HubInfo
// ============================================

/// Hub metadata returned by `GET /v1/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubInfo {
    /// Hub software version string.
    #[serde(default)]
    pub version: String,

    /// Whether the hub is mid-resync; syncing hubs reject submissions.
    #[serde(default)]
    pub is_syncing: bool,

    /// Operator-chosen nickname, if published.
    #[serde(default)]
    pub nickname: Option<String>,

    /// Gossip peer identity, if published.
    #[serde(default)]
    pub peer_id: Option<String>,
}

// ============================================
// ValidationOutcome
// ============================================

/// Result of asking a hub to validate a message without storing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the hub considers the message valid.
    #[serde(default)]
    pub valid: bool,

    /// Hub-supplied detail when invalid.
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================
// SubmitResult
// ============================================

/// Value-typed outcome of one message submission.
///
/// `HubClient::submit` never throws; it always resolves to one of
/// these so callers can branch on `success` without catching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Whether the hub accepted the message.
    pub success: bool,

    /// Hex content hash of the accepted message (its logical ID).
    #[serde(default)]
    pub hash: Option<String>,

    /// Top-level error description on failure.
    #[serde(default)]
    pub error: Option<String>,

    /// Underlying detail (hub reason text, last transport error).
    #[serde(default)]
    pub details: Option<String>,

    /// Number of retries consumed (0 = succeeded or failed on first try).
    pub retries: u32,
}

impl SubmitResult {
    /// An accepted submission.
    #[must_use]
    pub fn accepted(hash: impl Into<String>, retries: u32) -> Self {
        Self {
            success: true,
            hash: Some(hash.into()),
            error: None,
            details: None,
            retries,
        }
    }

    /// A failed submission.
    #[must_use]
    pub fn failed(error: impl Into<String>, details: Option<String>, retries: u32) -> Self {
        Self {
            success: false,
            hash: None,
            error: Some(error.into()),
            details,
            retries,
        }
    }

    /// A submission skipped because an earlier batch entry failed.
    #[must_use]
    pub fn not_attempted() -> Self {
        Self {
            success: false,
            hash: None,
            error: Some("not attempted".to_string()),
            details: None,
            retries: 0,
        }
    }

    /// Whether this entry was skipped by batch short-circuiting.
    #[must_use]
    pub fn is_not_attempted(&self) -> bool {
        !self.success && self.error.as_deref() == Some("not attempted")
    }
}

// ============================================
// Tests
// ============================================
