//! Canonical `www.` domain probe.

use super::CheckResult;
use crate::domain::is_canonical_www_domain;

pub(crate) const TITLE: &str = "The service domain format should be www.{service}.service.gov.uk";

const DESCRIPTION: &str = "The Service Manual states that Users must interact with a single \
     domain and that it will be www.{service}.service.gov.uk. It is permissible to create extra \
     domains for example for Content Delivery Networks, Assets or Administration, however the \
     user-facing domain should be prefixed by www.";

/// Passes iff `domain` is exactly `www.<single-label>.service.gov.uk`. No I/O.
pub fn check_canonical_www(domain: &str) -> CheckResult {
    if is_canonical_www_domain(domain) {
        CheckResult::pass(TITLE, DESCRIPTION)
    } else {
        CheckResult::fail(TITLE, DESCRIPTION)
    }
}
