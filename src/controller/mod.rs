//! Rate probe controller: the adaptive search loop.
//!
//! The controller owns the search state and drives burst after burst,
//! raising the candidate rate until the target throttles. The search is a
//! linear climb with a confidence gate: a candidate rate must survive
//! `required_confirmations` extra clean bursts before it is recorded as
//! safe and the rate advances by `rate_step`. Setting the gate to zero
//! reproduces single-pass behavior.
//!
//! Correctness rests on the target's throttling being deterministic and
//! monotonic in request rate: the first throttle observed brackets the
//! boundary between the last safe rate and the current one.

use log::info;

use crate::error_handling::ProbeFailure;
use crate::pacing::Clock;
use crate::prober::{BurstProber, ProbeOutcome};
use crate::transport::ProbeTransport;

/// Mutable state of the adaptive search.
///
/// Mutated only by the controller's own loop; the whole search is
/// single-threaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    /// Candidate rate currently under test, in requests per minute.
    /// Monotonically non-decreasing across the life of a run.
    pub current_rate: u32,
    /// Highest rate confirmed safe so far; 0 means none confirmed yet.
    pub last_safe_rate: u32,
    /// Clean bursts observed at `current_rate` since the last rate change.
    pub confirmations: u32,
}

impl SearchState {
    fn new(initial_rate: u32) -> Self {
        SearchState {
            current_rate: initial_rate,
            last_safe_rate: 0,
            confirmations: 0,
        }
    }
}

/// The highest confirmed-safe rate, as reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeRate {
    /// Last rate that passed the confirmation gate without throttling.
    pub requests_per_minute: u32,
    /// The candidate rate at which the target finally throttled.
    pub throttled_at: u32,
}

/// Outcome of one controller iteration.
enum Step {
    Continue,
    Finished(Result<SafeRate, ProbeFailure>),
}

/// Drives the adaptive search to completion over injected capabilities.
pub struct Controller<'a, T, C> {
    prober: BurstProber<'a, T, C>,
    required_confirmations: u32,
    rate_step: u32,
    state: SearchState,
    bursts_run: usize,
}

impl<'a, T: ProbeTransport, C: Clock> Controller<'a, T, C> {
    /// Creates a controller starting its search at `initial_rate`.
    pub fn new(
        prober: BurstProber<'a, T, C>,
        initial_rate: u32,
        required_confirmations: u32,
        rate_step: u32,
    ) -> Self {
        Controller {
            prober,
            required_confirmations,
            rate_step,
            state: SearchState::new(initial_rate),
            bursts_run: 0,
        }
    }

    /// Current search state (read-only).
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Number of bursts executed so far.
    pub fn bursts_run(&self) -> usize {
        self.bursts_run
    }

    /// Runs the search until the target throttles.
    ///
    /// The loop has no upper bound other than external throttling: a target
    /// that never throttles keeps the search climbing indefinitely.
    ///
    /// # Errors
    ///
    /// Returns `ProbeFailure::NoSafeRate` if throttling is observed before
    /// any rate passed the confirmation gate.
    pub async fn run(&mut self) -> Result<SafeRate, ProbeFailure> {
        loop {
            if let Step::Finished(result) = self.step().await {
                return result;
            }
        }
    }

    /// Executes one burst at the current rate and applies the decision
    /// policy.
    async fn step(&mut self) -> Step {
        let outcome = self.prober.probe_burst(self.state.current_rate).await;
        self.bursts_run += 1;

        match outcome {
            ProbeOutcome::Throttled { .. } => {
                if self.state.last_safe_rate == 0 {
                    Step::Finished(Err(ProbeFailure::NoSafeRate {
                        first_rate: self.state.current_rate,
                    }))
                } else {
                    Step::Finished(Ok(SafeRate {
                        requests_per_minute: self.state.last_safe_rate,
                        throttled_at: self.state.current_rate,
                    }))
                }
            }
            ProbeOutcome::Clean => {
                if self.state.confirmations < self.required_confirmations {
                    self.state.confirmations += 1;
                    info!(
                        "Confirming ... [{}/{}]",
                        self.state.confirmations, self.required_confirmations
                    );
                } else {
                    self.state.last_safe_rate = self.state.current_rate;
                    self.state.current_rate =
                        self.state.current_rate.saturating_add(self.rate_step);
                    self.state.confirmations = 0;
                    info!(
                        "No rate limit hit. Increasing rate to {} requests per minute.",
                        self.state.current_rate
                    );
                }
                Step::Continue
            }
        }
    }
}
