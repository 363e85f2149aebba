//! Error types for the check engine.
//!
//! This module provides:
//! - Error type definitions for every layer of the engine
//! - Mapping of `reqwest::Error` values onto [`FetchError`]
//!
//! Errors are grouped into:
//! - **Resolution**: the start page could not be fetched or has no start link
//! - **Validation**: the start link points outside the service domain family
//! - **Probe-local**: a probe's own request failed; each probe decides what that means
//! - **Parse**: a malformed header line (hard error; malformed HTML is never an error)

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    DomainRejection, FetchError, InitializationError, MalformedHeaderError, ProbeError,
    ResolveError,
};
