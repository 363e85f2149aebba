//! Error type definitions.
//!
//! This module defines all error types used throughout the engine.

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

    /// The configuration failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigValidationError),
}

/// Failure of a single outbound fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The URL could not be turned into a request.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No connection could be established (refused, DNS failure, TLS handshake).
    #[error("Could not connect to {url}: {detail}")]
    Connect { url: String, detail: String },

    /// The request did not complete in time.
    #[error("Timed out fetching {url}")]
    Timeout { url: String },

    /// The final response after redirects carried a 4xx or 5xx status.
    #[error("HTTP Error {status}: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// The response body could not be read.
    #[error("Failed to read response body from {url}: {detail}")]
    Body { url: String, detail: String },

    /// Any other transport failure (redirect loop, protocol error).
    #[error("Request to {url} failed: {detail}")]
    Transport { url: String, detail: String },
}

impl FetchError {
    /// Builds a status error, filling in the canonical reason phrase.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        FetchError::Status {
            url: url.into(),
            status,
            reason,
        }
    }

    /// URL the failure was observed at; after redirects this is the last hop.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Connect { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. }
            | FetchError::Transport { url, .. } => url,
        }
    }

    /// True when nothing answered: the connection was refused or timed out.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, FetchError::Connect { .. } | FetchError::Timeout { .. })
    }
}

/// A raw header line without the `": "` separator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed header line (no \": \" separator): {line:?}")]
pub struct MalformedHeaderError {
    /// The offending line, as received
    pub line: String,
}

/// Why a link was not accepted as belonging to the service domain family.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainRejection {
    /// The link is not a parsable absolute URL.
    #[error("The link '{link}' is not a valid URL")]
    Unparsable { link: String },

    /// The URL has no host component (e.g. `mailto:`).
    #[error("The link '{link}' has no host")]
    MissingHost { link: String },

    /// The host does not match `(www.)<name>.service.gov.uk`.
    #[error("The link is not to something on the service.gov.uk domain (host: {host})")]
    OutsideFamily { host: String },
}

/// Failure to obtain an entry link from a start page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The slug cannot form a start page URL.
    #[error("'{slug}' is not a valid start page path: {reason}")]
    InvalidSlug { slug: String, reason: String },

    /// The start page could not be fetched.
    #[error("Could not fetch {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The page was fetched but carries neither a "Start now" link nor a get-started form.
    #[error("Could not find 'Start now' link on {url}")]
    NoStartLink { url: String },
}

/// A probe fault not already mapped to a verdict by the probe itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    MalformedHeader(#[from] MalformedHeaderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_matches_reason_phrase() {
        let err = FetchError::status("https://foo.service.gov.uk/robots.txt", 404);
        assert_eq!(err.to_string(), "HTTP Error 404: Not Found");
    }

    #[test]
    fn test_status_error_unknown_code() {
        let err = FetchError::status("https://foo.service.gov.uk/", 599);
        assert_eq!(err.to_string(), "HTTP Error 599: Unknown");
    }

    #[test]
    fn test_is_unreachable() {
        assert!(FetchError::Timeout {
            url: "http://a/".into()
        }
        .is_unreachable());
        assert!(FetchError::Connect {
            url: "http://a/".into(),
            detail: "refused".into()
        }
        .is_unreachable());
        assert!(!FetchError::status("http://a/", 500).is_unreachable());
    }

    #[test]
    fn test_probe_error_is_transparent() {
        let err = ProbeError::from(MalformedHeaderError {
            line: "garbage".into(),
        });
        assert!(err.to_string().contains("garbage"));
    }
}
