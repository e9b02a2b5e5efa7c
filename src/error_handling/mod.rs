//! Error handling.
//!
//! This module provides:
//! - Configuration validation errors (fail fast, before probing)
//! - Initialization errors (logger, HTTP client)
//! - The business-level probe failure (no safe rate determined)
//!
//! Transport-level request failures are deliberately not represented here:
//! they are classified inside the transport layer and absorbed by the burst
//! loop, which logs them and carries on.

mod types;

// Re-export public API
pub use types::{ConfigError, InitializationError, ProbeFailure};
