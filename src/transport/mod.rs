//! Probe transport: the one HTTP capability the search needs.
//!
//! The core loop only has to distinguish three outcomes per request: an
//! explicit throttle signal, success, or anything else. Everything reqwest
//! can report collapses into that three-way classification here, so the
//! prober and controller stay free of HTTP details and can be driven by a
//! scripted transport in tests.

use std::sync::Arc;

use url::Url;

use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;

/// Classified result of one probe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The target answered without a throttle signal.
    Success(u16),
    /// The target explicitly refused the request due to rate policy (429).
    RateLimited,
    /// Any other failure: timeout, connection refused, DNS failure, or a
    /// non-429 error status. Logged by the burst loop, never throttling.
    TransportError(String),
}

/// Capability to send one probe request to the configured target.
///
/// Injected into the burst prober so tests can script outcomes without a
/// network.
#[allow(async_fn_in_trait)]
pub trait ProbeTransport {
    /// Sends one GET request and classifies the result.
    async fn send(&self) -> RequestOutcome;
}

/// reqwest-backed transport for a single target URL.
pub struct HttpTransport {
    client: Arc<reqwest::Client>,
    url: Url,
    treat_timeout_as_throttle: bool,
}

impl HttpTransport {
    /// Creates a transport bound to one target.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client (carries the per-request timeout)
    /// * `url` - Target URL every probe request is sent to
    /// * `treat_timeout_as_throttle` - Classify request timeouts as throttle
    ///   signals instead of transport errors
    pub fn new(client: Arc<reqwest::Client>, url: Url, treat_timeout_as_throttle: bool) -> Self {
        HttpTransport {
            client,
            url,
            treat_timeout_as_throttle,
        }
    }
}

impl ProbeTransport for HttpTransport {
    async fn send(&self) -> RequestOutcome {
        match self.client.get(self.url.clone()).send().await {
            Ok(response) => classify_status(response.status().as_u16()),
            Err(err) => classify_error(&err, self.treat_timeout_as_throttle),
        }
    }
}

/// Classifies an HTTP status code into a probe outcome.
///
/// 429 is the throttle signal. Other error statuses (4xx/5xx) count as
/// transport errors: they are diagnostic noise to the search, not evidence
/// of rate limiting.
pub(crate) fn classify_status(status: u16) -> RequestOutcome {
    if status == HTTP_STATUS_TOO_MANY_REQUESTS {
        RequestOutcome::RateLimited
    } else if (400..600).contains(&status) {
        RequestOutcome::TransportError(format!("HTTP status {}", status))
    } else {
        RequestOutcome::Success(status)
    }
}

/// Classifies a reqwest error into a probe outcome.
///
/// Timeouts optionally count as throttle signals: some targets shed load by
/// stalling instead of answering 429, and the toggle lets an operator probe
/// those too.
pub(crate) fn classify_error(err: &reqwest::Error, treat_timeout_as_throttle: bool) -> RequestOutcome {
    if err.is_timeout() && treat_timeout_as_throttle {
        return RequestOutcome::RateLimited;
    }
    RequestOutcome::TransportError(err.to_string())
}
