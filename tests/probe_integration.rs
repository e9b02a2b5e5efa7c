//! Integration tests for run_probe against a mock HTTP server
//!
//! These tests verify the full search loop end to end: pacing, throttle
//! detection, the decision policy, and the error taxonomy. They use a
//! 1-second burst window so a whole search finishes in a few seconds
//! instead of minutes of wall-clock pacing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rate_probe::{run_probe, LogFormat, LogLevel, ProbeConfig, ProbeFailure};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build a probe config pointed at a mock server, with a short
/// burst window so tests stay fast.
fn test_config(server: &MockServer, requests_per_minute: u32) -> ProbeConfig {
    ProbeConfig {
        url: server.uri().parse().expect("mock server URI is valid"),
        requests_per_minute,
        timeout_seconds: 5,
        confirmations: 0,
        rate_step: 1,
        burst_window_secs: 1,
        user_agent: "rate_probe_test/1.0".to_string(),
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}

/// Mounts a responder that answers 200 for the first `clean_requests`
/// requests and 429 afterwards.
async fn mount_throttle_after(server: &MockServer, clean_requests: u32) -> Arc<AtomicU32> {
    let counter = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&counter);
    Mock::given(method("GET"))
        .respond_with(move |_req: &wiremock::Request| {
            let n = seen.fetch_add(1, Ordering::SeqCst) + 1;
            if n > clean_requests {
                ResponseTemplate::new(429)
            } else {
                ResponseTemplate::new(200)
            }
        })
        .mount(server)
        .await;
    counter
}

#[tokio::test]
async fn test_immediate_throttle_reports_no_safe_rate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = test_config(&server, 10);
    let err = run_probe(config)
        .await
        .expect_err("throttling at the starting rate must fail the run");

    assert_eq!(
        err.downcast_ref::<ProbeFailure>(),
        Some(&ProbeFailure::NoSafeRate { first_rate: 10 })
    );
}

#[tokio::test]
async fn test_search_converges_on_last_clean_rate() {
    // 2/min and 3/min bursts are clean (5 requests total); the 6th request
    // onward throttles, so the 4/min burst fails on its first request.
    let server = MockServer::start().await;
    let counter = mount_throttle_after(&server, 5).await;

    let config = test_config(&server, 2);
    let report = run_probe(config).await.expect("search should succeed");

    assert_eq!(report.safe_rate, 3);
    assert_eq!(report.throttled_at, 4);
    assert_eq!(report.bursts, 3);
    // Early exit: the throttled burst sent exactly one request
    assert_eq!(counter.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_server_errors_do_not_count_as_throttling() {
    // First burst is nothing but 500s; it must still count as clean and
    // the search must end with that rate recorded as safe.
    let server = MockServer::start().await;
    let counter = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&counter);
    Mock::given(method("GET"))
        .respond_with(move |_req: &wiremock::Request| {
            match seen.fetch_add(1, Ordering::SeqCst) + 1 {
                1 | 2 => ResponseTemplate::new(500),
                3 | 4 => ResponseTemplate::new(200),
                _ => ResponseTemplate::new(429),
            }
        })
        .mount(&server)
        .await;

    let config = test_config(&server, 2);
    let report = run_probe(config).await.expect("search should succeed");

    // Burst at 2/min saw only 500s yet was clean; 3/min throttled on its
    // third request.
    assert_eq!(report.safe_rate, 2);
    assert_eq!(report.throttled_at, 3);
}

#[tokio::test]
async fn test_confirmation_gate_repeats_bursts() {
    // With 1 required confirmation, the 2/min rate is probed twice (4
    // requests) before advancing; the 3/min burst then throttles.
    let server = MockServer::start().await;
    let counter = mount_throttle_after(&server, 4).await;

    let config = ProbeConfig {
        confirmations: 1,
        ..test_config(&server, 2)
    };
    let report = run_probe(config).await.expect("search should succeed");

    assert_eq!(report.safe_rate, 2);
    assert_eq!(report.throttled_at, 3);
    // initial pass + confirmation + throttled burst
    assert_eq!(report.bursts, 3);
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_timeout_counts_as_throttle_when_toggled() {
    // The server stalls longer than the request timeout. With the toggle
    // on, the timeout is read as a throttle signal at the starting rate.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = ProbeConfig {
        timeout_seconds: 1,
        treat_timeout_as_throttle: true,
        ..test_config(&server, 10)
    };
    let err = run_probe(config)
        .await
        .expect_err("timeout should be read as throttling");

    assert_eq!(
        err.downcast_ref::<ProbeFailure>(),
        Some(&ProbeFailure::NoSafeRate { first_rate: 10 })
    );
}

#[tokio::test]
async fn test_invalid_config_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0) // probing must not start
        .mount(&server)
        .await;

    let config = ProbeConfig {
        requests_per_minute: 0,
        ..test_config(&server, 0)
    };
    let err = run_probe(config).await.expect_err("zero rate is invalid");
    assert!(err.to_string().contains("Requests per minute"));
}
