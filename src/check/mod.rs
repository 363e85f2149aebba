//! Check orchestration.
//!
//! Resolves the entry link for a slug, validates its domain, then fans the
//! probe set out as concurrent tasks and assembles a [`ServiceReport`] once
//! every task has finished.

mod report;

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};
use strum::IntoEnumIterator;

use crate::config::Config;
use crate::domain::validate_service_domain;
use crate::error_handling::InitializationError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::probes::{CheckResult, CheckTarget, ProbeKind};
use crate::start_page::{normalize_slug, resolve_entry_link, start_page_url};
use crate::utils::escape_html;

pub use report::ServiceReport;

const LINK_TITLE: &str = "The GOV.UK start page should link to the service";
const DOMAIN_TITLE: &str =
    "The GOV.UK start page should link to service on a service.gov.uk domain";

/// Runs service checks with a fixed configuration and fetcher.
///
/// Holds no per-check state, so one checker can serve concurrent callers.
/// No orchestrator-level timeout is imposed: callers needing a deadline
/// wrap [`ServiceChecker::run_service_check`] in `tokio::time::timeout`.
#[derive(Clone)]
pub struct ServiceChecker {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
}

impl ServiceChecker {
    /// Builds a checker that fetches over the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self, InitializationError> {
        config.validate()?;
        let fetcher = HttpFetcher::from_config(&config)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Builds a checker around any [`PageFetcher`].
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Audits the service linked from the start page at `slug`.
    ///
    /// Always produces a report. If the entry link cannot be resolved, or
    /// resolves outside the service domain family, the report holds a single
    /// failing entry and no probe runs.
    pub async fn run_service_check(&self, slug: &str) -> ServiceReport {
        let content_root = self.config.content_root_trimmed();
        info!("Checking start page {}", slug);

        let slug = match normalize_slug(slug, content_root) {
            Ok(slug) => slug,
            Err(e) => {
                warn!("{}", e);
                return ServiceReport::new(
                    slug.trim(),
                    None,
                    vec![CheckResult::fail(
                        LINK_TITLE,
                        format!("You supplied an invalid start page: {}", escape_html(&e.to_string())),
                    )],
                );
            }
        };
        let page = escape_html(&start_page_url(content_root, &slug)).into_owned();

        let link = match resolve_entry_link(self.fetcher.as_ref(), content_root, &slug).await {
            Ok(link) => link,
            Err(e) => {
                warn!("{}", e);
                return ServiceReport::new(
                    &slug,
                    None,
                    vec![CheckResult::fail(
                        LINK_TITLE,
                        format!(
                            "All transactions should start on GOV.UK with a transaction start page. \
                             You supplied the start page of <a href='{page}'>{page}</a>, but either \
                             the page does not exist, or I cannot find a 'Start now' link on this \
                             page pointing to a service.<br /><br />{}",
                            escape_html(&e.to_string())
                        ),
                    )],
                );
            }
        };

        let domain = match validate_service_domain(&link) {
            Ok(domain) => domain,
            Err(e) => {
                warn!("{}", e);
                let escaped_link = escape_html(&link);
                return ServiceReport::new(
                    &slug,
                    Some(link.clone()),
                    vec![CheckResult::fail(
                        DOMAIN_TITLE,
                        format!(
                            "You supplied the start page of <a href='{page}'>{page}</a> which \
                             appears to have a 'Start now' button, but it does not link to \
                             something on the service.gov.uk domain as it points to \
                             <a href='{escaped_link}'>{escaped_link}</a>.<br /><br />{}",
                            escape_html(&e.to_string())
                        ),
                    )],
                );
            }
        };

        let target = CheckTarget {
            slug: slug.clone(),
            link: link.clone(),
            domain,
            content_root: content_root.to_string(),
            listen_timeout: self.config.listen_probe_timeout(),
        };
        let entries = run_probes(Arc::clone(&self.fetcher), target).await;

        let report = ServiceReport::new(&slug, Some(link), entries);
        info!(
            "Finished {}: {}/{} checks passed",
            slug,
            report.entries.len() - report.failures().count(),
            report.entries.len()
        );
        report
    }
}

/// Runs every probe concurrently and returns their results in declaration order.
///
/// Each probe is a separate task that returns its own result; nothing is
/// shared between them. Results are placed by the probe's position in
/// [`ProbeKind`], never by completion order. A probe that errors or panics
/// becomes a failing entry and does not affect the others.
pub async fn run_probes(fetcher: Arc<dyn PageFetcher>, target: CheckTarget) -> Vec<CheckResult> {
    let target = Arc::new(target);

    let (kinds, tasks): (Vec<ProbeKind>, Vec<_>) = ProbeKind::iter()
        .map(|kind| {
            let fetcher = Arc::clone(&fetcher);
            let target = Arc::clone(&target);
            let task = tokio::spawn(async move { kind.run(fetcher.as_ref(), &target).await });
            (kind, task)
        })
        .unzip();

    // Join barrier: nothing is assembled until every probe has returned
    let outcomes = join_all(tasks).await;

    kinds
        .into_iter()
        .zip(outcomes)
        .map(|(kind, outcome)| match outcome {
            Ok(Ok(result)) => {
                debug!("Probe {} passed={}", kind, result.passed);
                result
            }
            Ok(Err(e)) => {
                warn!("Probe {} failed for {}: {}", kind, target.domain, e);
                kind.fault(&e.to_string())
            }
            Err(join_error) => {
                warn!("Probe {} task panicked: {:?}", kind, join_error);
                kind.fault(&format!("probe task aborted: {join_error}"))
            }
        })
        .collect()
}

/// Audits the service linked from `slug` with the default configuration.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built; check failures
/// are reported inside the [`ServiceReport`].
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = service_check::run_service_check("/register-to-vote").await?;
/// for entry in &report.entries {
///     println!("{} {}", if entry.passed { "PASS" } else { "FAIL" }, entry.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_service_check(slug: &str) -> Result<ServiceReport, InitializationError> {
    let checker = ServiceChecker::new(Config::default())?;
    Ok(checker.run_service_check(slug).await)
}
