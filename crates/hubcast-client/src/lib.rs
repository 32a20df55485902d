// ============================================
// File: crates/hubcast-client/src/lib.rs
// ============================================
//! # Hubcast Client - Hub Submission Library
//!
//! ## Creation Reason
//! Provides the network half of the pipeline: posting signed messages
//! to hubs with timeout, retry, and multi-endpoint failover semantics.
//!
//! ## Main Functionality
//! - [`submit`]: `HubClient` - single-hub submission with retry policy
//! - [`failover`]: `FailoverClient` - prioritized multi-hub failover
//! - [`config`]: TOML-loadable client configuration
//! - [`models`]: hub API models (`HubInfo`, `SubmitResult`)
//! - [`error`]: client error taxonomy with transient classification
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              hubcast-client  ◄── You are here       │
//! │                    │                                │
//! │                    ▼                                │
//! │              hubcast-core                           │
//! │                    │                                │
//! │                    ▼                                │
//! │             hubcast-common                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Philosophy
//! `HubClient::submit` never returns `Err`: every failure mode becomes
//! a [`models::SubmitResult`] value so callers inspect success/failure
//! without exception-style control flow. Lower layers raise typed
//! errors; only the failover layer retries across peers.
//!
//! ## ⚠️ Important Note for Next Developer
//! - The transient-error vocabulary in [`error`] IS the retry policy;
//!   widening it silently changes retry behavior everywhere
//! - Hub rejections carry hub-supplied detail text verbatim - never
//!   retry them, they will fail identically every time
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod failover;
pub mod models;
pub mod submit;

// Re-export commonly used items
pub use config::{ClientConfig, HubEndpoint, SubmitConfig};
pub use error::{ClientError, Result};
pub use failover::{select_best_hub, FailoverClient};
pub use models::{HubInfo, SubmitResult, ValidationOutcome};
pub use submit::HubClient;
