//! Cookie scoping probe.
//!
//! Works on the raw header lines rather than a [`crate::headers::HeaderMap`]:
//! a response may set several cookies and the map keeps only the last one.

use std::fmt;

use super::{CheckResult, CheckTarget};
use crate::config::HEADER_SET_COOKIE;
use crate::error_handling::{MalformedHeaderError, ProbeError};
use crate::fetch::PageFetcher;
use crate::headers::split_header_line;
use crate::utils::escape_html;

pub(crate) const TITLE: &str = "Cookies should be Secure, HttpOnly and scoped to the service domain";

const DESCRIPTION: &str = "Cookies used on www.{service}.service.gov.uk must be scoped to the \
     originating domain only. Cookies must not be scoped to the domain servicename.service.gov.uk. \
     Cookies must be sent with the <code>Secure</code> attribute and should, where appropriate, be \
     sent with the <code>HttpOnly</code> attribute. These flags \
     <a href='https://en.wikipedia.org/wiki/HTTP_cookie#Secure_and_HttpOnly'>provide additional \
     assurances about how cookies will be handled by browsers.</a>";

/// A cookie attribute the service must set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieAttribute {
    HttpOnly,
    Secure,
    /// `Domain=` scoped to exactly this service domain
    Domain(String),
}

impl fmt::Display for CookieAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieAttribute::HttpOnly => f.write_str("HttpOnly is not set"),
            CookieAttribute::Secure => f.write_str("Secure is not set"),
            CookieAttribute::Domain(domain) => {
                write!(f, "Cookie not scoped to domain={domain}")
            }
        }
    }
}

/// One missing attribute on one `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieViolation {
    /// Cookie name (text before the first `=`)
    pub cookie: String,
    /// Full `Set-Cookie` value as received
    pub header_value: String,
    pub attribute: CookieAttribute,
}

impl CookieViolation {
    /// One self-contained markup line naming the attribute and the cookie.
    pub fn describe(&self) -> String {
        format!(
            "<br /><br />{} on cookie <code>{}</code>: Set-Cookie: {}",
            escape_html(&self.attribute.to_string()),
            escape_html(&self.cookie),
            escape_html(&self.header_value)
        )
    }
}

/// Collects every missing attribute across every `Set-Cookie` line.
///
/// Attributes are compared case-insensitively. Nothing short-circuits: a
/// cookie missing all three attributes yields three violations.
///
/// # Errors
///
/// Returns [`MalformedHeaderError`] if any header line lacks `": "`.
pub fn find_cookie_violations<S: AsRef<str>>(
    header_lines: &[S],
    domain: &str,
) -> Result<Vec<CookieViolation>, MalformedHeaderError> {
    let cookie_domain = format!("domain={}", domain.to_ascii_lowercase());
    let mut violations = Vec::new();

    for line in header_lines {
        let (name, value) = split_header_line(line.as_ref())?;
        if name != HEADER_SET_COOKIE {
            continue;
        }

        let mut parts = value.split(';').map(str::trim);
        let cookie = parts
            .next()
            .and_then(|pair| pair.split('=').next())
            .unwrap_or_default()
            .to_string();
        let attributes: Vec<String> = parts.map(str::to_ascii_lowercase).collect();
        let has = |wanted: &str| attributes.iter().any(|a| a == wanted);

        let mut missing = Vec::new();
        if !has("httponly") {
            missing.push(CookieAttribute::HttpOnly);
        }
        if !has("secure") {
            missing.push(CookieAttribute::Secure);
        }
        if !has(&cookie_domain) {
            missing.push(CookieAttribute::Domain(domain.to_string()));
        }

        violations.extend(missing.into_iter().map(|attribute| CookieViolation {
            cookie: cookie.clone(),
            header_value: value.clone(),
            attribute,
        }));
    }

    Ok(violations)
}

/// Fetches the entry link and checks every cookie it sets.
pub async fn check_cookies(
    fetcher: &dyn PageFetcher,
    target: &CheckTarget,
) -> Result<CheckResult, ProbeError> {
    let page = fetcher.fetch_headers(&target.link, None).await?;
    let violations = find_cookie_violations(&page.header_lines, &target.domain)?;

    if violations.is_empty() {
        return Ok(CheckResult::pass(TITLE, DESCRIPTION));
    }

    let mut description = String::from(DESCRIPTION);
    for violation in &violations {
        description.push_str(&violation.describe());
    }
    Ok(CheckResult::fail(TITLE, description))
}
