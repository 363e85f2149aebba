//! Strict-Transport-Security header probe.

use super::{CheckResult, CheckTarget};
use crate::config::HEADER_STRICT_TRANSPORT_SECURITY;
use crate::error_handling::{FetchError, ProbeError};
use crate::fetch::PageFetcher;
use crate::utils::escape_html;

pub(crate) const TITLE: &str =
    "The service should set a Strict-Transport-Security (HSTS) header";

const DESCRIPTION: &str = "To reduce the chance that traffic for a user can be intercepted, the \
     service should notify the browser that in future it should only use secure connections. It \
     can do this by setting an HTTP Header called 'Strict-Transport-Security'.";

/// Passes iff the entry link's response carries `Strict-Transport-Security`.
///
/// An error status is a failure with the status in the description; other
/// transport failures are returned as [`ProbeError`].
pub async fn check_hsts_header(
    fetcher: &dyn PageFetcher,
    target: &CheckTarget,
) -> Result<CheckResult, ProbeError> {
    match fetcher.fetch_headers(&target.link, None).await {
        Ok(page) => {
            let headers = page.headers()?;
            if headers.contains_key(HEADER_STRICT_TRANSPORT_SECURITY) {
                Ok(CheckResult::pass(TITLE, DESCRIPTION))
            } else {
                Ok(CheckResult::fail(TITLE, DESCRIPTION))
            }
        }
        Err(e @ FetchError::Status { .. }) => Ok(CheckResult::fail(
            TITLE,
            format!(
                "{DESCRIPTION}<br /><br />Error: {}",
                escape_html(&e.to_string())
            ),
        )),
        Err(e) => Err(e.into()),
    }
}
