//! Bare-domain redirect probe.

use super::{same_location, CheckResult, CheckTarget};
use crate::error_handling::ProbeError;
use crate::fetch::PageFetcher;
use crate::utils::escape_html;

pub(crate) const TITLE: &str =
    "The bare service domain should redirect back to the GOV.UK start page";

/// Passes iff `https://<domain>/` ends up, after redirects, at the start page.
///
/// A transport failure is not mapped to a verdict here; it surfaces as a
/// [`ProbeError`] and the orchestrator reports it as a failure.
pub async fn check_bare_domain_redirect(
    fetcher: &dyn PageFetcher,
    target: &CheckTarget,
) -> Result<CheckResult, ProbeError> {
    let bare_domain = target.secure_root();
    let correct_location = target.start_page_url();
    let page = fetcher.fetch_headers(&bare_domain, None).await?;

    let bare = escape_html(&bare_domain);
    let correct = escape_html(&correct_location);
    let description = format!(
        "In order to make sure that all transactions begin and end on GOV.UK, it is important that \
         the bare domain (<a href='{bare}'>{bare}</a>) redirects back to the GOV.UK start page \
         (<a href='{correct}'>{correct}</a>), so that if users are typing the URL from memory, \
         they get a consistent user experience and their browser does not cache the wrong entry page."
    );

    if same_location(&page.final_url, &correct_location) {
        Ok(CheckResult::pass(TITLE, description))
    } else {
        Ok(CheckResult::fail(
            TITLE,
            format!(
                "{description}<br /><br />The bare domain currently ends up at {}",
                escape_html(&page.final_url)
            ),
        ))
    }
}
