//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and probe configuration.

use clap::{Parser, ValueEnum};
use url::Url;

use crate::config::constants::{
    DEFAULT_BURST_WINDOW_SECS, DEFAULT_CONFIRMED_RATE_STEP, DEFAULT_SINGLE_PASS_RATE_STEP,
    DEFAULT_USER_AGENT,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// Two invocation shapes are supported by the same argument list:
///
/// - `rate_probe <URL> <RPM> <TIMEOUT> <CONFIRMATIONS>` — multi-confirmation
///   mode: each candidate rate must survive `CONFIRMATIONS` extra clean
///   bursts before it is trusted, and the rate then advances by 1.
/// - `rate_probe <URL> <RPM> <TIMEOUT>` — single-pass mode: one clean burst
///   is enough, and the rate advances by 10.
///
/// `--rate-step` overrides the mode's default increment in either shape.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rate_probe",
    about = "Discovers the maximum safe request rate an HTTP endpoint tolerates before throttling"
)]
pub struct Opt {
    /// Target URL to probe
    pub url: String,

    /// Starting rate in requests per minute
    pub requests_per_minute: u32,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Consecutive extra clean bursts required before trusting a rate.
    /// Omit for single-pass mode.
    pub confirmations: Option<u32>,

    /// Rate increment per advance (defaults: 1 with confirmations, 10 without)
    #[arg(long)]
    pub rate_step: Option<u32>,

    /// Count request timeouts as throttle signals instead of transport errors
    #[arg(long)]
    pub treat_timeout_as_throttle: bool,

    /// Length of one burst evaluation window in seconds
    #[arg(long, default_value_t = DEFAULT_BURST_WINDOW_SECS)]
    pub burst_window_secs: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Probe configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies, and is
/// immutable once a run starts.
///
/// # Examples
///
/// ```no_run
/// use rate_probe::ProbeConfig;
///
/// let config = ProbeConfig {
///     url: "https://api.example.com/health".parse().unwrap(),
///     requests_per_minute: 30,
///     confirmations: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Target URL to probe
    pub url: Url,

    /// Starting rate in requests per minute
    pub requests_per_minute: u32,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Consecutive extra clean bursts required before trusting a rate
    /// (0 = single-pass behavior)
    pub confirmations: u32,

    /// Rate increment applied each time a rate is confirmed safe
    pub rate_step: u32,

    /// Count request timeouts as throttle signals instead of transport errors
    pub treat_timeout_as_throttle: bool,

    /// Length of one burst evaluation window in seconds
    pub burst_window_secs: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: Url::parse("http://localhost/").expect("static URL is valid"),
            requests_per_minute: 10,
            timeout_seconds: 10,
            confirmations: 0,
            rate_step: DEFAULT_CONFIRMED_RATE_STEP,
            treat_timeout_as_throttle: false,
            burst_window_secs: DEFAULT_BURST_WINDOW_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl ProbeConfig {
    /// Validates the numeric bounds the search relies on.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        if self.requests_per_minute < 1 {
            return Err(ConfigError::ZeroRate);
        }
        if self.timeout_seconds < 1 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.rate_step < 1 {
            return Err(ConfigError::ZeroRateStep);
        }
        if self.burst_window_secs < 1 {
            return Err(ConfigError::ZeroBurstWindow);
        }
        Ok(())
    }
}

impl TryFrom<Opt> for ProbeConfig {
    type Error = ConfigError;

    fn try_from(opt: Opt) -> Result<Self, Self::Error> {
        let url = Url::parse(&opt.url).map_err(|source| ConfigError::InvalidUrl {
            url: opt.url.clone(),
            source,
        })?;

        // The two observed modes differ in their default step: careful
        // (confirmed) runs creep by 1, single-pass runs jump by 10.
        let rate_step = opt.rate_step.unwrap_or(match opt.confirmations {
            Some(_) => DEFAULT_CONFIRMED_RATE_STEP,
            None => DEFAULT_SINGLE_PASS_RATE_STEP,
        });

        let config = ProbeConfig {
            url,
            requests_per_minute: opt.requests_per_minute,
            timeout_seconds: opt.timeout_seconds,
            confirmations: opt.confirmations.unwrap_or(0),
            rate_step,
            treat_timeout_as_throttle: opt.treat_timeout_as_throttle,
            burst_window_secs: opt.burst_window_secs,
            user_agent: opt.user_agent,
            log_level: opt.log_level,
            log_format: opt.log_format,
        };
        config.validate()?;
        Ok(config)
    }
}
