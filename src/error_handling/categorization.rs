//! Error categorization.
//!
//! This module maps transport errors from `reqwest` onto [`FetchError`].

use super::types::FetchError;

/// Categorizes a `reqwest::Error` into a [`FetchError`].
///
/// Timeouts are checked before connect failures: a connect timeout reports
/// both, and the probes treat either as "nothing answered".
///
/// # Arguments
///
/// * `url` - The URL that was requested, used when the error carries none
/// * `error` - The `reqwest::Error` to categorize
pub fn categorize_reqwest_error(url: &str, error: &reqwest::Error) -> FetchError {
    let url = error
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| url.to_string());

    if let Some(status) = error.status() {
        return FetchError::status(url, status.as_u16());
    }

    if error.is_builder() {
        FetchError::InvalidUrl {
            url,
            reason: error.to_string(),
        }
    } else if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect {
            url,
            detail: root_cause(error),
        }
    } else if error.is_body() || error.is_decode() {
        FetchError::Body {
            url,
            detail: root_cause(error),
        }
    } else {
        FetchError::Transport {
            url,
            detail: root_cause(error),
        }
    }
}

/// Innermost error message; `reqwest` wraps the useful text several layers deep.
fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
