//! robots.txt probe.

use super::{CheckResult, CheckTarget};
use crate::config::HEADER_CONTENT_TYPE;
use crate::error_handling::ProbeError;
use crate::fetch::PageFetcher;
use crate::utils::escape_html;

pub(crate) const TITLE: &str = "The service should have a robots.txt file";

const DESCRIPTION: &str = "Every service hosted on a service.gov.uk domain must have a robots.txt \
     file asking search engines not to index any part of the site. More details can be found on \
     the <a href='http://www.robotstxt.org/faq/prevent.html'>Web Robots pages</a>";

const PLAIN_TEXT: &str = "text/plain";

/// Passes iff `https://<domain>/robots.txt` is served as `text/plain`.
///
/// Any fetch failure is a failing verdict carrying the error detail.
pub async fn check_robots_txt(
    fetcher: &dyn PageFetcher,
    target: &CheckTarget,
) -> Result<CheckResult, ProbeError> {
    let url = format!("https://{}/robots.txt", target.domain);

    let page = match fetcher.fetch_headers(&url, None).await {
        Ok(page) => page,
        Err(e) => {
            return Ok(CheckResult::fail(
                TITLE,
                format!(
                    "Could not find robots.txt (Error: {})",
                    escape_html(&e.to_string())
                ),
            ));
        }
    };

    let headers = page.headers()?;
    match headers.get(HEADER_CONTENT_TYPE) {
        // Media types are case-insensitive
        Some(content_type) if content_type.to_ascii_lowercase().starts_with(PLAIN_TEXT) => {
            Ok(CheckResult::pass(TITLE, DESCRIPTION))
        }
        Some(content_type) => Ok(CheckResult::fail(
            TITLE,
            format!(
                "The robots.txt file exists, but is {} rather than text/plain.",
                escape_html(content_type)
            ),
        )),
        None => Ok(CheckResult::fail(
            TITLE,
            "The robots.txt file exists, but is served without a Content-Type rather than text/plain.",
        )),
    }
}
