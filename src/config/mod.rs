//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (burst window, step defaults, etc.)
//! - CLI option types and parsing
//! - The validated `ProbeConfig` the library runs from

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, Opt, ProbeConfig};
