//! Pacing clock: the time capability injected into the burst prober.
//!
//! Pacing between requests is the only place the probe touches the clock,
//! so it is abstracted behind one small trait. Production uses tokio's
//! timer; tests use a virtual clock that advances instantly and records the
//! delays it was asked for.

use std::time::{Duration, Instant};

/// Monotonic clock and delay capability.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Returns the current instant on a monotonic clock.
    fn now(&self) -> Instant;

    /// Suspends the current task for `duration`.
    async fn delay(&self, duration: Duration);
}

/// Production clock backed by tokio's timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
