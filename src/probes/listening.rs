//! Plain-HTTP listening probe.

use log::debug;

use super::{same_location, CheckResult, CheckTarget};
use crate::error_handling::{FetchError, ProbeError};
use crate::fetch::PageFetcher;
use crate::utils::escape_html;

pub(crate) const TITLE: &str = "The service should enforce SSL";

const DESCRIPTION: &str = "Users must have confidence that any information they are submitting to \
     a service, including pages they visit, is not available to a 3rd-party. In order to enforce \
     this, the service should either reject non-SSL connections, or should immediately redirect \
     them to secured connection via SSL.";

/// Checks that `http://<domain>/` is either closed or redirects to HTTPS.
///
/// Uses the target's short listen timeout. Outcomes:
/// - nothing answers (refused or timed out): pass, the service does not listen on HTTP
/// - the request ends at `https://<domain>/`: pass, HTTP is redirected
/// - anything else answered over HTTP: fail
///
/// Only "nothing answered" is read as a pass. Other transport failures
/// (e.g. a redirect loop) are returned as [`ProbeError`].
pub async fn check_listening_on_http(
    fetcher: &dyn PageFetcher,
    target: &CheckTarget,
) -> Result<CheckResult, ProbeError> {
    let http_location = target.insecure_root();
    let ssl_location = target.secure_root();

    let redirected = CheckResult::pass(
        format!("{TITLE} (Service redirects HTTP to HTTPS)"),
        DESCRIPTION,
    );

    match fetcher
        .fetch_headers(&http_location, Some(target.listen_timeout))
        .await
    {
        Ok(page) if same_location(&page.final_url, &ssl_location) => Ok(redirected),
        Ok(page) => Ok(CheckResult::fail(
            TITLE,
            format!(
                "{DESCRIPTION}<br /><br />{} was answered at {} without redirecting to {}",
                escape_html(&http_location),
                escape_html(&page.final_url),
                escape_html(&ssl_location)
            ),
        )),
        // The redirect happened; whatever went wrong afterwards is on the HTTPS side
        Err(e) if same_location(e.url(), &ssl_location) => {
            debug!("HTTP redirected to {} which then failed: {}", ssl_location, e);
            Ok(redirected)
        }
        Err(e) if e.is_unreachable() => {
            debug!("{} not reachable: {}", http_location, e);
            Ok(CheckResult::pass(
                format!("{TITLE} (Service does not listen on HTTP)"),
                DESCRIPTION,
            ))
        }
        Err(e @ FetchError::Status { .. }) => Ok(CheckResult::fail(
            TITLE,
            format!(
                "{DESCRIPTION}<br /><br />{} responded over plain HTTP ({})",
                escape_html(&http_location),
                escape_html(&e.to_string())
            ),
        )),
        Err(e) => Err(e.into()),
    }
}
