// ============================================
// File: crates/hubcast-client/src/failover.rs
// ============================================
//! # Hub Selector / Failover Client
//!
//! ## Creation Reason
//! A single hub going down should not strand the caller. This module
//! ranks multiple endpoints, probes their health, and transparently
//! switches to the next-priority hub when the bound one fails.
//!
//! ## Main Functionality
//! - `FailoverClient`: prioritized multi-hub submission
//! - `select_best_hub`: readiness probe across priority-sorted hubs
//!
//! ## State Machine
//! ```text
//!  NoHub ──first submit──► Probing ──accept/reject──► Bound(i)
//!                             ▲                          │
//!                             └────── hub-class error ───┘
//!                                     (resume at i+1)
//!
//!  i past end of list ──► Exhausted: "no available hubs"
//!                         (terminal for this submission; the pointer
//!                          resets so the next one re-probes from the top)
//! ```
//!
//! Only hub-class errors (network, timeout, 5xx, retry exhaustion)
//! advance the pointer. A data rejection is the hub working correctly,
//! so the client stays bound and surfaces the rejection.
//!
//! ## ⚠️ Important Note for Next Developer
//! - The current-endpoint pointer is shared session state; it is
//!   guarded by a mutex so concurrent submissions cannot race the
//!   advance. Hold the lock only to read/write the index, never across
//!   an await
//! - Endpoints are sorted by ascending priority at construction; ties
//!   keep their configured order
//!
//! ## Last Modified
//! v0.1.0 - Initial failover client

use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use hubcast_core::message::Message;

use crate::config::{HubEndpoint, SubmitConfig};
use crate::error::{ClientError, Result};
use crate::models::SubmitResult;
use crate::submit::{result_from_error, HubClient};

// ============================================
// FailoverState
// ============================================

/// Which endpoint the client is currently bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailoverState {
    /// No endpoint selected yet (fresh client, or the last submission
    /// exhausted the list).
    NoHub,
    /// Bound to the endpoint at this index in the sorted list.
    Bound(usize),
}

// ============================================
// FailoverClient
// ============================================

/// Submission client over a prioritized set of hub endpoints.
pub struct FailoverClient {
    /// Endpoints with their bound clients, sorted by ascending priority.
    clients: Vec<(HubEndpoint, HubClient)>,
    /// Current binding, shared across concurrent submissions.
    state: Mutex<FailoverState>,
}

impl FailoverClient {
    /// Creates a failover client from a prioritized endpoint list.
    ///
    /// # Errors
    /// Returns a `Config` error if the list is empty or a client
    /// cannot be constructed for an endpoint.
    pub fn new(mut endpoints: Vec<HubEndpoint>, config: SubmitConfig) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(ClientError::config(
                "hubs",
                "failover requires at least one endpoint",
            ));
        }
        endpoints.sort_by_key(|endpoint| endpoint.priority);

        let mut clients = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let client = HubClient::new(&endpoint.url, config.clone())?;
            clients.push((endpoint, client));
        }
        Ok(Self {
            clients,
            state: Mutex::new(FailoverState::NoHub),
        })
    }

    /// Returns the endpoints in selection order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<&HubEndpoint> {
        self.clients.iter().map(|(endpoint, _)| endpoint).collect()
    }

    /// Returns the endpoint the client is currently bound to, if any.
    #[must_use]
    pub fn current_endpoint(&self) -> Option<&HubEndpoint> {
        match *self.state.lock() {
            FailoverState::NoHub => None,
            FailoverState::Bound(index) => self.clients.get(index).map(|(endpoint, _)| endpoint),
        }
    }

    /// Submits a message via the current hub, failing over on hub-class
    /// errors.
    ///
    /// Walks the priority-sorted list starting at the bound endpoint.
    /// Each endpoint applies its own retry policy internally; a
    /// hub-class failure advances to the next endpoint, a data
    /// rejection stops and surfaces immediately. Running past the end
    /// of the list reports "no available hubs" with the last cause.
    pub async fn submit(&self, message: &Message) -> SubmitResult {
        let start = match *self.state.lock() {
            FailoverState::NoHub => 0,
            FailoverState::Bound(index) => index,
        };

        let mut index = start;
        let mut last_cause: Option<String> = None;

        while index < self.clients.len() {
            let (endpoint, client) = &self.clients[index];
            match client.submit_classified(message).await {
                Ok(retries) => {
                    if index != start {
                        info!(
                            from = %self.clients[start].0.url,
                            to = %endpoint.url,
                            "failed over to next-priority hub"
                        );
                    }
                    *self.state.lock() = FailoverState::Bound(index);
                    return SubmitResult::accepted(message.hash().to_hex(), retries);
                }
                Err((err, _retries)) if err.is_hub_error() => {
                    warn!(
                        hub = %endpoint.url,
                        error = %err,
                        "hub failure, advancing to next endpoint"
                    );
                    last_cause = Some(err.to_string());
                    index += 1;
                }
                Err((err, retries)) => {
                    // Data rejection: the hub is healthy, stay bound to it
                    *self.state.lock() = FailoverState::Bound(index);
                    return result_from_error(&err, retries);
                }
            }
        }

        // Exhausted the endpoint list; reset so the next submission
        // re-probes from the top
        *self.state.lock() = FailoverState::NoHub;
        let err = ClientError::NoAvailableHubs {
            last: last_cause.clone().unwrap_or_else(|| "no endpoints tried".to_string()),
        };
        error!(error = %err, "all hubs exhausted");
        SubmitResult::failed(err.to_string(), last_cause, 0)
    }
}

impl std::fmt::Debug for FailoverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverClient")
            .field("endpoints", &self.clients.len())
            .field("state", &*self.state.lock())
            .finish()
    }
}

// ============================================
// Hub Selection
// ============================================

/// Probes hubs in priority order and returns the first that is ready.
///
/// A hub is ready when its info endpoint answers within `timeout_ms`
/// and reports that it is not mid-resync. Returns `None` when every
/// candidate fails the probe.
pub async fn select_best_hub(endpoints: &[HubEndpoint], timeout_ms: u64) -> Option<HubEndpoint> {
    let mut sorted = endpoints.to_vec();
    sorted.sort_by_key(|endpoint| endpoint.priority);

    let probe_config = SubmitConfig {
        request_timeout_secs: timeout_ms.div_ceil(1000).max(1),
        max_retries: 0,
        retry_delay_ms: 0,
    };

    for endpoint in sorted {
        let Ok(client) = HubClient::new(&endpoint.url, probe_config.clone()) else {
            continue;
        };
        match tokio::time::timeout(Duration::from_millis(timeout_ms), client.is_ready()).await {
            Ok(true) => {
                info!(hub = %endpoint.url, priority = endpoint.priority, "selected hub");
                return Some(endpoint);
            }
            Ok(false) => {
                debug!(hub = %endpoint.url, "hub not ready, trying next");
            }
            Err(_) => {
                debug!(hub = %endpoint.url, timeout_ms, "readiness probe timed out");
            }
        }
    }
    None
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(url: &str, priority: u32) -> HubEndpoint {
        HubEndpoint::new(url, priority)
    }

    #[test]
    fn test_empty_endpoint_list_rejected() {
        let result = FailoverClient::new(Vec::new(), SubmitConfig::default());
        assert!(matches!(result, Err(ClientError::Config { .. })));
    }

    #[test]
    fn test_endpoints_sorted_by_priority() {
        let client = FailoverClient::new(
            vec![
                endpoint("http://hub-c.example.com", 3),
                endpoint("http://hub-a.example.com", 1),
                endpoint("http://hub-b.example.com", 2),
            ],
            SubmitConfig::default(),
        )
        .unwrap();

        let urls: Vec<&str> = client
            .endpoints()
            .iter()
            .map(|e| e.url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "http://hub-a.example.com",
                "http://hub-b.example.com",
                "http://hub-c.example.com",
            ]
        );
    }

    #[test]
    fn test_starts_unbound() {
        let client = FailoverClient::new(
            vec![endpoint("http://hub.example.com", 1)],
            SubmitConfig::default(),
        )
        .unwrap();
        assert!(client.current_endpoint().is_none());
    }

    #[tokio::test]
    async fn test_select_best_hub_none_reachable() {
        // Nothing listens on these ports
        let hubs = vec![
            endpoint("http://127.0.0.1:9", 1),
            endpoint("http://127.0.0.1:19", 2),
        ];
        assert!(select_best_hub(&hubs, 500).await.is_none());
    }
}
