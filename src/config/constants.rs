//! Configuration constants.
//!
//! Central location for probe defaults and protocol constants so they are
//! easy to find and adjust.

/// Length of one burst evaluation window, in seconds.
///
/// A burst issues exactly `rate` requests paced evenly across this window,
/// so the tested rate is a true requests-per-minute figure. Overridable via
/// `--burst-window-secs` (shorter windows are useful for testing against
/// local mock servers).
pub const DEFAULT_BURST_WINDOW_SECS: u64 = 60;

/// Default rate increment when a confirmation count is supplied.
///
/// Multi-confirmation runs creep upward one request/minute at a time so the
/// reported safe rate is tight against the throttling boundary.
pub const DEFAULT_CONFIRMED_RATE_STEP: u32 = 1;

/// Default rate increment for single-pass runs (no confirmation count).
///
/// Single-pass runs trade precision for speed and jump in larger steps.
pub const DEFAULT_SINGLE_PASS_RATE_STEP: u32 = 10;

/// HTTP status code for rate limiting (Too Many Requests).
///
/// The one response with business meaning to the probe: it is the explicit
/// throttle signal the search converges on.
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Default User-Agent header value sent with every probe request.
pub const DEFAULT_USER_AGENT: &str = concat!("rate_probe/", env!("CARGO_PKG_VERSION"));
