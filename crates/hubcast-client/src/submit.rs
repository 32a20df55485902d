// ============================================
// File: crates/hubcast-client/src/submit.rs
// ============================================
//! # Hub Submission Client
//!
//! ## Creation Reason
//! Posts serialized messages to a single hub endpoint and interprets
//! the HTTP response, applying the bounded retry policy for transient
//! failures.
//!
//! ## Main Functionality
//! - `HubClient::submit`: retrying binary POST to `/v1/submitMessage`
//! - `validate` / `hub_info` / `is_ready`: auxiliary hub API calls
//! - `submit_batch`: ordered, fail-fast sequential submission
//! - `submit_parallel`: independent concurrent submission
//!
//! ## Retry Policy
//! ```text
//! attempt 1 ──transient──► sleep 1×delay ──► attempt 2
//!           ──transient──► sleep 2×delay ──► attempt 3
//!           ──transient──► sleep 3×delay ──► attempt 4 (= 1 + max_retries)
//!           ──transient──► Exhausted (carries last cause)
//!
//! any non-transient error ──► fail immediately, no retry consumed
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `submit` must stay infallible (returns `SubmitResult`, never
//!   `Err`); callers branch on the value
//! - Every request is bounded by the configured timeout at the HTTP
//!   client level; a fired timeout classifies as a network error
//! - Batch submission is all-or-nothing ordered: once one message
//!   fails, the rest are NOT sent
//!
//! ## Last Modified
//! v0.1.0 - Initial submission client

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, warn};

use hubcast_core::message::Message;

use crate::config::SubmitConfig;
use crate::error::{ClientError, Result};
use crate::models::{HubInfo, SubmitResult, ValidationOutcome};

// ============================================
// API Paths
// ============================================

const SUBMIT_PATH: &str = "/v1/submitMessage";
const VALIDATE_PATH: &str = "/v1/validateMessage";
const INFO_PATH: &str = "/v1/info";

// ============================================
// HubClient
// ============================================

/// HTTP client bound to one hub endpoint.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HubClient {
    base_url: String,
    config: SubmitConfig,
    http: reqwest::Client,
}

impl HubClient {
    /// Creates a client for the given hub base URL.
    ///
    /// # Errors
    /// Returns a `Config` error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, config: SubmitConfig) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::config("http client", e.to_string()))?;
        Ok(Self {
            base_url,
            config,
            http,
        })
    }

    /// Returns the hub base URL this client is bound to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================
    // Submission
    // ========================================

    /// Submits a signed message, retrying transient failures.
    ///
    /// Never returns `Err`: every failure mode resolves to a
    /// [`SubmitResult`] value. The accepted hash is the message's
    /// content hash, which hubs use as its logical ID.
    pub async fn submit(&self, message: &Message) -> SubmitResult {
        match self.submit_classified(message).await {
            Ok(retries) => {
                debug!(
                    hub = %self.base_url,
                    hash = %message.hash(),
                    retries,
                    "message accepted"
                );
                SubmitResult::accepted(message.hash().to_hex(), retries)
            }
            Err((err, retries)) => {
                error!(
                    hub = %self.base_url,
                    hash = %message.hash(),
                    retries,
                    error = %err,
                    "message submission failed"
                );
                result_from_error(&err, retries)
            }
        }
    }

    /// Submits a message, preserving the typed error for the caller.
    ///
    /// Used by the failover layer, which needs to distinguish hub
    /// failures from data rejections. Returns the retry count on
    /// success, or the terminal error plus the retries consumed.
    pub(crate) async fn submit_classified(
        &self,
        message: &Message,
    ) -> std::result::Result<u32, (ClientError, u32)> {
        // Encoding errors are programming errors: no retry budget spent
        let wire = match message.to_wire_bytes() {
            Ok(wire) => wire,
            Err(e) => return Err((ClientError::Core(e), 0)),
        };

        let mut retries: u32 = 0;
        loop {
            match self.submit_once(&wire).await {
                Ok(()) => return Ok(retries),
                Err(err) if err.is_transient() && retries < self.config.max_retries => {
                    retries += 1;
                    let delay = self.config.retry_delay_ms.saturating_mul(u64::from(retries));
                    warn!(
                        hub = %self.base_url,
                        attempt = retries + 1,
                        delay_ms = delay,
                        error = %err,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(err) if err.is_transient() => {
                    // Retry budget spent on transient failures
                    return Err((
                        ClientError::Exhausted {
                            attempts: retries + 1,
                            last: Box::new(err),
                        },
                        retries,
                    ));
                }
                Err(err) => return Err((err, retries)),
            }
        }
    }

    /// One submission attempt: binary POST, status classification.
    async fn submit_once(&self, wire: &[u8]) -> Result<()> {
        let response = self
            .http
            .post(self.url(SUBMIT_PATH))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(wire.to_vec())
            .send()
            .await
            .map_err(|e| ClientError::from_transport(&e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_status(status.as_u16(), body))
    }

    // ========================================
    // Validation & Hub Metadata
    // ========================================

    /// Asks the hub to validate a message without storing it.
    ///
    /// A non-2xx answer with a hub reason is reported as an invalid
    /// outcome, not an error; transport failures and hub unavailability
    /// surface as errors.
    ///
    /// # Errors
    /// - encoding failures from the message itself
    /// - network errors and transient hub statuses
    /// - unparseable response bodies
    pub async fn validate(&self, message: &Message) -> Result<ValidationOutcome> {
        let wire = message.to_wire_bytes()?;
        let response = self
            .http
            .post(self.url(VALIDATE_PATH))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(wire)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(&e))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<ValidationOutcome>()
                .await
                .map_err(|e| ClientError::invalid_response("validateMessage", e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_status(status.as_u16(), body);
        match err {
            // The hub examined the message and said no
            ClientError::Rejected { reason, .. } => Ok(ValidationOutcome {
                valid: false,
                error: Some(reason),
            }),
            other => Err(other),
        }
    }

    /// Fetches hub metadata from `GET /v1/info`.
    ///
    /// # Errors
    /// Network errors, non-2xx statuses, and unparseable bodies.
    pub async fn hub_info(&self) -> Result<HubInfo> {
        let response = self
            .http
            .get(self.url(INFO_PATH))
            .send()
            .await
            .map_err(|e| ClientError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status.as_u16(), body));
        }
        response
            .json::<HubInfo>()
            .await
            .map_err(|e| ClientError::invalid_response("info", e.to_string()))
    }

    /// Whether the hub is reachable and not mid-resync.
    pub async fn is_ready(&self) -> bool {
        match self.hub_info().await {
            Ok(info) => !info.is_syncing,
            Err(err) => {
                debug!(hub = %self.base_url, error = %err, "readiness probe failed");
                false
            }
        }
    }

    // ========================================
    // Batch Operations
    // ========================================

    /// Submits messages sequentially, short-circuiting on first failure.
    ///
    /// Models an all-or-nothing ordered submission: once one message
    /// fails, every subsequent message is marked not attempted and
    /// never sent.
    pub async fn submit_batch(&self, messages: &[Message]) -> Vec<SubmitResult> {
        let mut results = Vec::with_capacity(messages.len());
        let mut failed = false;
        for message in messages {
            if failed {
                results.push(SubmitResult::not_attempted());
                continue;
            }
            let result = self.submit(message).await;
            failed = !result.success;
            results.push(result);
        }
        results
    }

    /// Submits messages concurrently, collecting independent results.
    ///
    /// No ordering guarantee between in-flight requests; results are
    /// returned in input order. Use when atomicity does not matter.
    pub async fn submit_parallel(&self, messages: &[Message]) -> Vec<SubmitResult> {
        futures::future::join_all(messages.iter().map(|message| self.submit(message))).await
    }
}

// ============================================
// Error → SubmitResult mapping
// ============================================

pub(crate) fn result_from_error(err: &ClientError, retries: u32) -> SubmitResult {
    match err {
        ClientError::Rejected { status, reason } => SubmitResult::failed(
            format!("Hub rejected message: HTTP {status}"),
            Some(reason.clone()),
            retries,
        ),
        ClientError::Exhausted { attempts, last } => SubmitResult::failed(
            format!("Retries exhausted after {attempts} attempts"),
            Some(last.to_string()),
            retries,
        ),
        ClientError::Core(core) => {
            SubmitResult::failed("Message encoding failed", Some(core.to_string()), retries)
        }
        other => SubmitResult::failed(other.to_string(), None, retries),
    }
}

// ============================================
// Tests
// ============================================
