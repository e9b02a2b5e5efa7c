//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP client used for
//! probe requests.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ProbeConfig;
use reqwest::ClientBuilder;

/// Initializes the HTTP client for probe requests.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the probe configuration
/// - Per-request timeout from the probe configuration
/// - Redirect following enabled (reqwest default, up to 10 hops)
///
/// The timeout bounds every individual probe request; a request that
/// exceeds it surfaces as a timeout error, which the transport layer
/// classifies (by default as a transport error, not a throttle signal).
///
/// # Arguments
///
/// * `config` - Probe configuration containing user-agent and timeout settings
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &ProbeConfig) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
