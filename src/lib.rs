//! rate_probe library: adaptive HTTP rate-limit discovery
//!
//! This library empirically characterizes a target endpoint's throttling
//! policy: it issues paced request bursts at a climbing rate, watches for
//! explicit rate-limit signals (HTTP 429), and converges on the highest
//! requests-per-minute value the target tolerates.
//!
//! # Example
//!
//! ```no_run
//! use rate_probe::{run_probe, ProbeConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProbeConfig {
//!     url: "https://api.example.com/health".parse()?,
//!     requests_per_minute: 30,
//!     confirmations: 2,
//!     ..Default::default()
//! };
//!
//! let report = run_probe(config).await?;
//! println!("Safe rate: {} requests/minute (throttled at {})",
//!          report.safe_rate, report.throttled_at);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod controller;
mod error_handling;
pub mod initialization;
mod pacing;
mod prober;
#[cfg(test)]
pub(crate) mod test_support;
mod transport;

// Re-export public API
pub use config::{LogFormat, LogLevel, Opt, ProbeConfig};
pub use error_handling::{ConfigError, InitializationError, ProbeFailure};
pub use run::{run_probe, ProbeReport};

// Internal run module (wires capabilities into the controller)
mod run {
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::info;

    use crate::config::ProbeConfig;
    use crate::controller::Controller;
    use crate::initialization::init_client;
    use crate::pacing::TokioClock;
    use crate::prober::BurstProber;
    use crate::transport::HttpTransport;

    /// Results of a completed probe run.
    ///
    /// Only produced when the search succeeded: a safe rate was confirmed
    /// and the target was subsequently observed throttling.
    #[derive(Debug, Clone)]
    pub struct ProbeReport {
        /// Highest requests-per-minute value confirmed safe
        pub safe_rate: u32,
        /// The candidate rate at which the target throttled
        pub throttled_at: u32,
        /// Number of bursts executed over the whole search
        pub bursts: usize,
        /// Elapsed wall-clock time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the adaptive rate-limit search with the provided configuration.
    ///
    /// This is the main entry point for the library. It builds the HTTP
    /// client, then drives paced bursts at a climbing rate until the target
    /// throttles, returning the last confirmed-safe rate.
    ///
    /// # Arguments
    ///
    /// * `config` - Probe configuration (target URL, starting rate, timeout,
    ///   confirmation gate, step policy)
    ///
    /// # Errors
    ///
    /// - `ConfigError` if the configuration fails validation
    /// - `InitializationError` if the HTTP client cannot be built
    /// - [`ProbeFailure::NoSafeRate`](crate::ProbeFailure::NoSafeRate) if
    ///   the target throttled before any rate was confirmed safe (downcast
    ///   through the returned `anyhow::Error` to tell this apart from setup
    ///   failures)
    pub async fn run_probe(config: ProbeConfig) -> Result<ProbeReport> {
        config.validate()?;

        let started = Instant::now();
        let client = init_client(&config).context("Failed to build HTTP client")?;
        let transport = HttpTransport::new(
            client,
            config.url.clone(),
            config.treat_timeout_as_throttle,
        );
        let clock = TokioClock;
        let prober = BurstProber::new(
            &transport,
            &clock,
            Duration::from_secs(config.burst_window_secs),
        );
        let mut controller = Controller::new(
            prober,
            config.requests_per_minute,
            config.confirmations,
            config.rate_step,
        );

        info!("Starting rate limit probing for URL: {}", config.url);
        let safe_rate = controller.run().await?;

        Ok(ProbeReport {
            safe_rate: safe_rate.requests_per_minute,
            throttled_at: safe_rate.throttled_at,
            bursts: controller.bursts_run(),
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }
}
