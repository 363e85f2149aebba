//! The report produced by one service check.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::probes::CheckResult;

/// Ordered verdicts for one slug.
///
/// Built once when a check completes and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    /// Normalized slug of the start page
    pub slug: String,
    /// Entry link found on the start page, if any
    pub link: Option<String>,
    /// When the report was assembled
    pub checked_at: DateTime<Utc>,
    /// Probe results in declaration order, or a single explanatory entry
    pub entries: Vec<CheckResult>,
}

impl ServiceReport {
    pub(crate) fn new(slug: &str, link: Option<String>, entries: Vec<CheckResult>) -> Self {
        Self {
            slug: slug.to_string(),
            link,
            checked_at: Utc::now(),
            entries,
        }
    }

    /// True when every entry passed.
    pub fn passed(&self) -> bool {
        self.entries.iter().all(|entry| entry.passed)
    }

    /// Entries that did not pass, in report order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.entries.iter().filter(|entry| !entry.passed)
    }
}
