//! Service domain validation.
//!
//! This module decides whether a link belongs to the audited domain family,
//! `(www.)<name>.service.gov.uk`, and whether a host uses the canonical
//! `www.` form the Service Manual asks for.
//!
//! Key functions:
//! - `validate_service_domain()` - Extracts the host from a link and checks the family pattern
//! - `is_canonical_www_domain()` - Stricter check requiring the `www.` label

use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::DomainRejection;

static SERVICE_DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(www\.)?[^.]+\.service\.gov\.uk$")
        .expect("service domain pattern is a valid regex")
});

static CANONICAL_WWW_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^www\.[^.]+\.service\.gov\.uk$").expect("canonical www pattern is a valid regex")
});

/// Extracts the service domain from a link.
///
/// Parses `link` as an absolute URL, takes its host (without port), and
/// accepts it when it matches `(www.)<name>.service.gov.uk` where `<name>`
/// is a single label. Pure: performs no I/O.
///
/// # Errors
///
/// Returns a [`DomainRejection`] when the link cannot be parsed, has no
/// host, or its host falls outside the domain family. A malformed link is
/// a rejection, never a panic.
///
/// # Examples
///
/// ```
/// use service_check::domain::validate_service_domain;
///
/// assert_eq!(
///     validate_service_domain("https://foo.service.gov.uk/blah").unwrap(),
///     "foo.service.gov.uk"
/// );
/// assert!(validate_service_domain("https://foo.foo.gov.uk/blah").is_err());
/// ```
pub fn validate_service_domain(link: &str) -> Result<String, DomainRejection> {
    let parsed = url::Url::parse(link).map_err(|_| DomainRejection::Unparsable {
        link: link.to_string(),
    })?;

    // url lower-cases domain hosts, so the pattern needs no case folding
    let host = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| DomainRejection::MissingHost {
            link: link.to_string(),
        })?;

    if SERVICE_DOMAIN_PATTERN.is_match(host) {
        Ok(host.to_string())
    } else {
        Err(DomainRejection::OutsideFamily {
            host: host.to_string(),
        })
    }
}

/// True when `domain` is exactly `www.<single-label>.service.gov.uk`.
pub fn is_canonical_www_domain(domain: &str) -> bool {
    CANONICAL_WWW_PATTERN.is_match(domain)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
