//! Shared test doubles for the probe core.
//!
//! The prober and controller are generic over the clock and transport
//! capabilities; these scripted implementations let their tests run
//! deterministically with no sockets and no wall-clock sleeps.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::pacing::Clock;
use crate::transport::{ProbeTransport, RequestOutcome};

/// Virtual clock: `now()` advances only when `delay()` is called, and every
/// requested delay is recorded for assertions.
pub(crate) struct VirtualClock {
    base: Instant,
    elapsed: Mutex<Duration>,
    delays: Mutex<Vec<Duration>>,
}

impl VirtualClock {
    pub(crate) fn new() -> Self {
        VirtualClock {
            base: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            delays: Mutex::new(Vec::new()),
        }
    }

    /// Advances `now()` without recording a pacing delay.
    ///
    /// Lets a test transport simulate request latency.
    pub(crate) fn advance(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
    }

    /// All delays requested so far, in order.
    pub(crate) fn recorded_delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }

    /// Sum of all delays requested so far.
    pub(crate) fn total_delay(&self) -> Duration {
        self.recorded_delays().iter().sum()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Instant {
        self.base + *self.elapsed.lock().unwrap()
    }

    async fn delay(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
        self.delays.lock().unwrap().push(duration);
    }
}

/// Transport that replays a scripted sequence of outcomes, then keeps
/// returning a default outcome once the script is exhausted.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<RequestOutcome>>,
    default: RequestOutcome,
    sent: Mutex<u32>,
}

impl ScriptedTransport {
    /// Replays `outcomes` in order, then answers `Success(200)` forever.
    pub(crate) fn new(outcomes: Vec<RequestOutcome>) -> Self {
        ScriptedTransport {
            script: Mutex::new(outcomes.into()),
            default: RequestOutcome::Success(200),
            sent: Mutex::new(0),
        }
    }

    /// Answers `outcome` for every request.
    pub(crate) fn always(outcome: RequestOutcome) -> Self {
        ScriptedTransport {
            script: Mutex::new(VecDeque::new()),
            default: outcome,
            sent: Mutex::new(0),
        }
    }

    /// Number of requests sent through this transport so far.
    pub(crate) fn requests_sent(&self) -> u32 {
        *self.sent.lock().unwrap()
    }
}

impl ProbeTransport for ScriptedTransport {
    async fn send(&self) -> RequestOutcome {
        *self.sent.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default.clone())
    }
}
