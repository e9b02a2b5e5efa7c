//! Burst prober: one paced pass of requests at a candidate rate.
//!
//! A burst issues exactly `rate` sequential requests spaced evenly across
//! the evaluation window (60 seconds by default), so the tested rate is a
//! true requests-per-minute figure. The first throttle signal ends the
//! burst immediately; other request failures are logged and skipped over.

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::pacing::Clock;
use crate::transport::{ProbeTransport, RequestOutcome};

/// Result of one full burst at a candidate rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Every request in the burst completed without a throttle signal.
    Clean,
    /// The target throttled partway through the burst.
    Throttled {
        /// How many requests had been issued when the signal arrived.
        requests_sent: u32,
    },
}

/// Issues paced request bursts through an injected transport and clock.
pub struct BurstProber<'a, T, C> {
    transport: &'a T,
    clock: &'a C,
    window: Duration,
}

impl<'a, T: ProbeTransport, C: Clock> BurstProber<'a, T, C> {
    /// Creates a prober that paces each burst across `window`.
    pub fn new(transport: &'a T, clock: &'a C, window: Duration) -> Self {
        BurstProber {
            transport,
            clock,
            window,
        }
    }

    /// Executes one burst of `rate` paced requests.
    ///
    /// Pacing is best effort: each iteration aims to start `window / rate`
    /// after the previous one, sleeping off whatever the request itself did
    /// not consume. A request slower than the interval gets no extra delay.
    ///
    /// Returns `Throttled` as soon as any request classifies as a rate-limit
    /// signal; remaining iterations are skipped. Transport errors are logged
    /// and do not count as throttling.
    pub async fn probe_burst(&self, rate: u32) -> ProbeOutcome {
        let interval = self.window / rate.max(1);
        info!(
            "Testing with {} requests per minute ({:.1}s between requests)...",
            rate,
            interval.as_secs_f64()
        );

        for i in 0..rate {
            debug!("Request {}/{} ...", i + 1, rate);
            let started = self.clock.now();

            match self.transport.send().await {
                RequestOutcome::RateLimited => {
                    warn!("Rate limit hit using {} requests per minute.", rate);
                    return ProbeOutcome::Throttled {
                        requests_sent: i + 1,
                    };
                }
                RequestOutcome::TransportError(msg) => error!("Error: {}", msg),
                RequestOutcome::Success(_) => {}
            }

            let spent = self.clock.now().saturating_duration_since(started);
            if spent < interval {
                self.clock.delay(interval - spent).await;
            }
        }

        ProbeOutcome::Clean
    }
}
