//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for invalid probe configuration.
///
/// All configuration problems are detected up front, before any request is
/// sent. The binary surfaces them as usage text plus exit code 1.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The target URL could not be parsed.
    #[error("Invalid target URL '{url}': {source}")]
    InvalidUrl {
        /// The URL string as supplied on the command line.
        url: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },

    /// The target URL uses a scheme the probe cannot speak.
    #[error("Unsupported URL scheme '{0}': only http and https are supported")]
    UnsupportedScheme(String),

    /// The starting rate must be at least one request per minute.
    #[error("Requests per minute must be at least 1")]
    ZeroRate,

    /// The per-request timeout must be at least one second.
    #[error("Request timeout must be at least 1 second")]
    ZeroTimeout,

    /// The rate increment must be at least one request per minute.
    #[error("Rate step must be at least 1")]
    ZeroRateStep,

    /// The burst window must be at least one second.
    #[error("Burst window must be at least 1 second")]
    ZeroBurstWindow,
}

/// Business-level probe failures.
///
/// This is the only error with meaning to the search itself: transport
/// errors are absorbed inside the burst loop and never propagate here.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProbeFailure {
    /// Throttling was observed before any rate was confirmed safe.
    ///
    /// The very first rate tested already triggered the target's rate
    /// limiter, so there is no safe rate to report. The operator should
    /// retry with a lower starting rate.
    #[error("Unable to determine safe rate limit: throttled at the starting rate of {first_rate} requests/minute")]
    NoSafeRate {
        /// The starting rate that was immediately throttled.
        first_rate: u32,
    },
}
