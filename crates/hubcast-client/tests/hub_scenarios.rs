// ============================================
// File: crates/hubcast-client/tests/hub_scenarios.rs
// ============================================
//! End-to-end submission scenarios against an in-process mock hub.
//!
//! The mock hub is a bare `TcpListener` serving canned HTTP/1.1
//! responses from a queue, which keeps the retry/failover behavior
//! observable without standing up a real hub.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use hubcast_client::{
    select_best_hub, ClientError, FailoverClient, HubClient, HubEndpoint, SubmitConfig,
};
use hubcast_common::time::FarcasterTime;
use hubcast_common::types::Fid;
use hubcast_core::crypto::MessageSigner;
use hubcast_core::protocol::{
    CastAddBody, FarcasterNetwork, MessageBody, MessageData, MessageType,
};
use hubcast_core::Message;

// ============================================
// Mock Hub
// ============================================

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    body: String,
}

impl CannedResponse {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn ok() -> Self {
        Self::new(200, "{}")
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown",
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Reads one HTTP request (headers + content-length body) and answers
/// with the next canned response; falls back to 200 when the queue is
/// empty.
async fn serve_one(mut stream: TcpStream, queue: Arc<Mutex<VecDeque<CannedResponse>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let (header_end, content_length) = loop {
        let Ok(n) = stream.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_string();
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            break (pos + 4, content_length);
        }
    };

    while buf.len() < header_end + content_length {
        let Ok(n) = stream.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let response = queue.lock().pop_front().unwrap_or_else(CannedResponse::ok);
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        status_reason(response.status),
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Spawns a mock hub answering with the queued responses in order.
async fn spawn_hub(responses: Vec<CannedResponse>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(serve_one(stream, Arc::clone(&queue)));
        }
    });

    addr
}

// ============================================
// Helpers
// ============================================

fn fast_config(max_retries: u32) -> SubmitConfig {
    SubmitConfig {
        request_timeout_secs: 5,
        max_retries,
        retry_delay_ms: 10,
    }
}

fn cast_message(signer: &MessageSigner, text: &str) -> Message {
    let data = MessageData::new(
        MessageType::CastAdd,
        Fid::new(123),
        FarcasterTime::from_secs(90_000_000),
        FarcasterNetwork::Mainnet,
        MessageBody::CastAdd(CastAddBody::from_text(text)),
    )
    .unwrap();
    Message::build(data, signer).unwrap()
}

fn hub_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

// ============================================
// Submission Scenarios
// ============================================

#[tokio::test]
async fn submit_retries_through_transient_failures() {
    let addr = spawn_hub(vec![
        CannedResponse::new(503, "unavailable"),
        CannedResponse::new(503, "unavailable"),
        CannedResponse::new(503, "unavailable"),
        CannedResponse::ok(),
    ])
    .await;

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "retry me");
    let client = HubClient::new(hub_url(addr), fast_config(3)).unwrap();

    let result = client.submit(&message).await;
    assert!(result.success, "expected success, got {result:?}");
    assert_eq!(result.retries, 3);
    assert_eq!(result.hash.as_deref(), Some(message.hash().to_hex().as_str()));
}

#[tokio::test]
async fn submit_fails_immediately_on_rejection() {
    // The trailing 200 would make an (incorrect) retry succeed
    let addr = spawn_hub(vec![
        CannedResponse::new(400, "message is a duplicate"),
        CannedResponse::ok(),
    ])
    .await;

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "dup");
    let client = HubClient::new(hub_url(addr), fast_config(3)).unwrap();

    let result = client.submit(&message).await;
    assert!(!result.success);
    assert_eq!(result.retries, 0);
    assert!(result.details.as_deref().unwrap().contains("duplicate"));
}

#[tokio::test]
async fn submit_reports_exhaustion_with_cause() {
    let addr = spawn_hub(vec![
        CannedResponse::new(503, "unavailable"),
        CannedResponse::new(503, "unavailable"),
    ])
    .await;

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "doomed");
    let client = HubClient::new(hub_url(addr), fast_config(1)).unwrap();

    let result = client.submit(&message).await;
    assert!(!result.success);
    assert_eq!(result.retries, 1);
    assert!(result.error.as_deref().unwrap().contains("2 attempts"));
    assert!(result.details.as_deref().unwrap().contains("503"));
}

#[tokio::test]
async fn rate_limiting_is_retried() {
    let addr = spawn_hub(vec![
        CannedResponse::new(429, "rate limited"),
        CannedResponse::ok(),
    ])
    .await;

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "slow down");
    let client = HubClient::new(hub_url(addr), fast_config(2)).unwrap();

    let result = client.submit(&message).await;
    assert!(result.success);
    assert_eq!(result.retries, 1);
}

// ============================================
// Batch Scenarios
// ============================================

#[tokio::test]
async fn batch_short_circuits_after_first_failure() {
    let addr = spawn_hub(vec![
        CannedResponse::ok(),
        CannedResponse::new(400, "invalid signature"),
        // No third response: the third message must never be sent
    ])
    .await;

    let signer = MessageSigner::generate();
    let messages = vec![
        cast_message(&signer, "one"),
        cast_message(&signer, "two"),
        cast_message(&signer, "three"),
    ];
    let client = HubClient::new(hub_url(addr), fast_config(0)).unwrap();

    let results = client.submit_batch(&messages).await;
    assert_eq!(results.len(), 3);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[1].details.as_deref().unwrap().contains("invalid signature"));
    assert!(results[2].is_not_attempted());
}

#[tokio::test]
async fn parallel_submissions_are_independent() {
    let addr = spawn_hub(vec![
        CannedResponse::ok(),
        CannedResponse::new(400, "bad"),
        CannedResponse::ok(),
    ])
    .await;

    let signer = MessageSigner::generate();
    let messages = vec![
        cast_message(&signer, "a"),
        cast_message(&signer, "b"),
        cast_message(&signer, "c"),
    ];
    let client = HubClient::new(hub_url(addr), fast_config(0)).unwrap();

    let results = client.submit_parallel(&messages).await;
    assert_eq!(results.len(), 3);
    // Responses race between connections, but exactly one rejection
    // lands somewhere and does not block the others
    let failures = results.iter().filter(|r| !r.success).count();
    assert_eq!(failures, 1);
    assert!(results.iter().all(|r| !r.is_not_attempted()));
}

// ============================================
// Validation & Metadata
// ============================================

#[tokio::test]
async fn validate_round_trips_hub_verdict() {
    let addr = spawn_hub(vec![
        CannedResponse::new(200, r#"{"valid": true}"#),
        CannedResponse::new(400, "unknown fid"),
    ])
    .await;

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "check me");
    let client = HubClient::new(hub_url(addr), fast_config(0)).unwrap();

    let outcome = client.validate(&message).await.unwrap();
    assert!(outcome.valid);

    let outcome = client.validate(&message).await.unwrap();
    assert!(!outcome.valid);
    assert!(outcome.error.as_deref().unwrap().contains("unknown fid"));
}

#[tokio::test]
async fn readiness_tracks_sync_state() {
    let addr = spawn_hub(vec![
        CannedResponse::new(200, r#"{"version": "1.14.0", "isSyncing": false}"#),
        CannedResponse::new(200, r#"{"version": "1.14.0", "isSyncing": true}"#),
    ])
    .await;

    let client = HubClient::new(hub_url(addr), fast_config(0)).unwrap();
    assert!(client.is_ready().await);
    assert!(!client.is_ready().await);
}

#[tokio::test]
async fn hub_info_surfaces_rejected_status() {
    let addr = spawn_hub(vec![CannedResponse::new(500, "boom")]).await;

    let client = HubClient::new(hub_url(addr), fast_config(0)).unwrap();
    let err = client.hub_info().await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 500, .. }));
}

// ============================================
// Failover Scenarios
// ============================================

#[tokio::test]
async fn failover_switches_to_next_priority_hub() {
    // Priority 1 hub: nothing listens there (connection refused)
    let dead = HubEndpoint::new("http://127.0.0.1:9", 1);
    let live_addr = spawn_hub(vec![CannedResponse::ok()]).await;
    let live = HubEndpoint::new(hub_url(live_addr), 2);

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "keep going");

    let client =
        FailoverClient::new(vec![live.clone(), dead], fast_config(0)).unwrap();
    let result = client.submit(&message).await;

    assert!(result.success, "expected failover success, got {result:?}");
    // The switch is recorded: the client is now bound to the live hub
    assert_eq!(client.current_endpoint().unwrap().url, live.url);
}

#[tokio::test]
async fn failover_does_not_advance_on_rejection() {
    let first_addr = spawn_hub(vec![CannedResponse::new(400, "duplicate")]).await;
    let first = HubEndpoint::new(hub_url(first_addr), 1);
    let second_addr = spawn_hub(vec![CannedResponse::ok()]).await;
    let second = HubEndpoint::new(hub_url(second_addr), 2);

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "rejected");

    let client = FailoverClient::new(vec![first.clone(), second], fast_config(0)).unwrap();
    let result = client.submit(&message).await;

    // A data rejection is not a hub failure: no failover, verbatim detail
    assert!(!result.success);
    assert!(result.details.as_deref().unwrap().contains("duplicate"));
    assert_eq!(client.current_endpoint().unwrap().url, first.url);
}

#[tokio::test]
async fn failover_exhaustion_reports_no_available_hubs() {
    let client = FailoverClient::new(
        vec![
            HubEndpoint::new("http://127.0.0.1:9", 1),
            HubEndpoint::new("http://127.0.0.1:19", 2),
        ],
        fast_config(0),
    )
    .unwrap();

    let signer = MessageSigner::generate();
    let message = cast_message(&signer, "nowhere to go");

    let result = client.submit(&message).await;
    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("No available hubs"));
    assert!(result.details.is_some());
    // Terminal for this submission; the next one starts from the top
    assert!(client.current_endpoint().is_none());
}

#[tokio::test]
async fn select_best_hub_skips_syncing_hubs() {
    let syncing_addr = spawn_hub(vec![CannedResponse::new(200, r#"{"isSyncing": true}"#)]).await;
    let ready_addr = spawn_hub(vec![CannedResponse::new(200, r#"{"isSyncing": false}"#)]).await;

    let hubs = vec![
        HubEndpoint::new(hub_url(syncing_addr), 1),
        HubEndpoint::new(hub_url(ready_addr), 2),
    ];

    let best = select_best_hub(&hubs, 2000).await.unwrap();
    assert_eq!(best.url, hub_url(ready_addr));
}
