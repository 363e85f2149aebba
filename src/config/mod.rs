//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, size limits, the audited domain family)
//! - The library `Config` struct and its validation
//! - Logging and exit-code option types shared with the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigValidationError, FailOn, LogFormat, LogLevel, OutputFormat};
