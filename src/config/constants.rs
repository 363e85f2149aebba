//! Configuration constants.
//!
//! This module defines the constants used throughout the engine, including
//! timeouts, size limits and the header names the probes look up.

/// Site that publishes transaction start pages.
pub const DEFAULT_CONTENT_ROOT: &str = "https://www.gov.uk";

// Network operation timeouts
/// Per-request timeout in seconds for every fetch except the HTTP-listening probe
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Timeout for the plain-HTTP probe in milliseconds.
///
/// A service that drops packets on port 80 would otherwise hold up the
/// whole report for the full request timeout.
pub const LISTEN_PROBE_TIMEOUT_MS: u64 = 1000;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "service_check/",
    env!("CARGO_PKG_VERSION"),
    " (+https://www.gov.uk/service-manual)"
);

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Bodies are truncated at this size; start pages are far smaller.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// Redirect handling
/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Maximum slug length (2048 characters), matching common URL length limits.
pub const MAX_SLUG_LENGTH: usize = 2048;

// Header names inspected by the probes (lower-cased, as produced by the header parser)
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "strict-transport-security";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_SET_COOKIE: &str = "set-cookie";
