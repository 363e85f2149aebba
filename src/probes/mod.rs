//! The probe set.
//!
//! Each probe inspects one requirement of the audited service and produces a
//! [`CheckResult`]. Probes are read-only and idempotent, share no state, and
//! each owns the response it fetched. [`ProbeKind`] fixes the order in which
//! results appear in a report.

mod cookies;
mod hsts;
mod listening;
mod redirect;
mod robots;
mod www;

use std::time::Duration;

use serde::Serialize;
use strum_macros::EnumIter;

use crate::error_handling::ProbeError;
use crate::fetch::PageFetcher;
use crate::utils::escape_html;

pub use cookies::{find_cookie_violations, CookieAttribute, CookieViolation};

/// Verdict of one check, with explanatory HTML markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Whether the requirement is met
    pub passed: bool,
    /// Short statement of the requirement
    pub title: String,
    /// HTML-safe explanation; untrusted values inside it are escaped
    pub description: String,
}

impl CheckResult {
    pub fn pass(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            passed: true,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn fail(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            passed: false,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Everything a probe needs to know about the service under audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTarget {
    /// Normalized slug of the start page (leading `/`)
    pub slug: String,
    /// Entry link found on the start page
    pub link: String,
    /// Validated service domain extracted from `link`
    pub domain: String,
    /// Content site root, without trailing slash
    pub content_root: String,
    /// Timeout for the plain-HTTP probe
    pub listen_timeout: Duration,
}

impl CheckTarget {
    /// Start page URL the bare domain is expected to redirect to.
    pub fn start_page_url(&self) -> String {
        crate::start_page::start_page_url(&self.content_root, &self.slug)
    }

    /// `https://<domain>/`
    pub fn secure_root(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// `http://<domain>/`
    pub fn insecure_root(&self) -> String {
        format!("http://{}/", self.domain)
    }
}

/// True when two URLs name the same location.
///
/// Both sides are parsed so that percent-encoding and host case do not
/// matter; unparsable input falls back to plain string equality.
pub(crate) fn same_location(actual: &str, expected: &str) -> bool {
    match (url::Url::parse(actual), url::Url::parse(expected)) {
        (Ok(actual), Ok(expected)) => actual == expected,
        _ => actual == expected,
    }
}

/// The probes, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ProbeKind {
    BareDomainRedirect,
    HttpListening,
    Hsts,
    CanonicalWww,
    RobotsTxt,
    Cookies,
}

impl ProbeKind {
    /// Stable identifier used in logs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::BareDomainRedirect => "bare-domain-redirect",
            ProbeKind::HttpListening => "http-listening",
            ProbeKind::Hsts => "hsts",
            ProbeKind::CanonicalWww => "canonical-www",
            ProbeKind::RobotsTxt => "robots-txt",
            ProbeKind::Cookies => "cookies",
        }
    }

    /// Title of the requirement the probe checks.
    pub fn title(&self) -> &'static str {
        match self {
            ProbeKind::BareDomainRedirect => redirect::TITLE,
            ProbeKind::HttpListening => listening::TITLE,
            ProbeKind::Hsts => hsts::TITLE,
            ProbeKind::CanonicalWww => www::TITLE,
            ProbeKind::RobotsTxt => robots::TITLE,
            ProbeKind::Cookies => cookies::TITLE,
        }
    }

    /// Runs the probe against `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] for transport or header faults the probe does
    /// not itself map to a verdict.
    pub async fn run(
        self,
        fetcher: &dyn PageFetcher,
        target: &CheckTarget,
    ) -> Result<CheckResult, ProbeError> {
        match self {
            ProbeKind::BareDomainRedirect => {
                redirect::check_bare_domain_redirect(fetcher, target).await
            }
            ProbeKind::HttpListening => listening::check_listening_on_http(fetcher, target).await,
            ProbeKind::Hsts => hsts::check_hsts_header(fetcher, target).await,
            ProbeKind::CanonicalWww => Ok(www::check_canonical_www(&target.domain)),
            ProbeKind::RobotsTxt => robots::check_robots_txt(fetcher, target).await,
            ProbeKind::Cookies => cookies::check_cookies(fetcher, target).await,
        }
    }

    /// Failing result for a probe that could not reach a verdict.
    pub fn fault(&self, detail: &str) -> CheckResult {
        CheckResult::fail(
            self.title(),
            format!(
                "The check could not be completed.<br /><br />Error: {}",
                escape_html(detail)
            ),
        )
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub(crate) fn test_target(domain: &str) -> CheckTarget {
    CheckTarget {
        slug: "/apply-for-thing".to_string(),
        link: format!("https://{domain}/start"),
        domain: domain.to_string(),
        content_root: "https://www.gov.uk".to_string(),
        listen_timeout: Duration::from_secs(1),
    }
}
