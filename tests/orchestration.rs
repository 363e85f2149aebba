//! Orchestration tests: concurrency, result ordering, and short circuits.

mod helpers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use helpers::*;
use service_check::{Config, FetchError, ProbeKind, ServiceChecker};
use strum::IntoEnumIterator;

fn checker(fetcher: Arc<ScriptedFetcher>) -> ServiceChecker {
    ServiceChecker::with_fetcher(Config::default(), fetcher)
}

#[tokio::test]
async fn test_report_order_ignores_completion_order() {
    // The first probe in declaration order is made to finish last
    let fetcher = Arc::new(compliant_service_with_delays(
        Duration::from_millis(300),
        Duration::ZERO,
    ));
    let report = checker(fetcher.clone())
        .run_service_check("/apply-for-thing")
        .await;

    assert_eq!(fetcher.completed().last().map(String::as_str), Some(SECURE_ROOT));

    assert_eq!(report.entries.len(), 6);
    for (entry, kind) in report.entries.iter().zip(ProbeKind::iter()) {
        // Some probes qualify their title on pass
        assert!(entry.title.starts_with(kind.title()), "{} at {}", entry.title, kind);
    }
    assert!(report.passed(), "{:#?}", report.entries);
}

#[tokio::test]
async fn test_probes_run_concurrently() {
    // Four delayed requests: bare domain, HSTS, cookies, robots
    let delay = Duration::from_millis(400);
    let fetcher = Arc::new(compliant_service_with_delays(delay, delay));

    let started = Instant::now();
    let report = checker(fetcher).run_service_check("/apply-for-thing").await;
    let elapsed = started.elapsed();

    assert_eq!(report.entries.len(), 6);
    assert!(
        elapsed < Duration::from_millis(1200),
        "probes appear to run sequentially: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_each_run_is_independent() {
    let fetcher = Arc::new(compliant_service());
    let checker = checker(fetcher);

    let (first, second) = tokio::join!(
        checker.run_service_check("/apply-for-thing"),
        checker.run_service_check("/apply-for-thing")
    );
    assert_eq!(first.entries, second.entries);
}

#[tokio::test]
async fn test_no_start_link_yields_single_entry() {
    let fetcher = Arc::new(ScriptedFetcher::new().page(
        START_PAGE,
        ok_page(START_PAGE, &[], "<html><body><h1>Apply</h1></body></html>"),
    ));
    let report = checker(fetcher.clone())
        .run_service_check("/apply-for-thing")
        .await;

    assert_eq!(report.entries.len(), 1);
    assert!(!report.entries[0].passed);
    assert_eq!(
        report.entries[0].title,
        "The GOV.UK start page should link to the service"
    );
    // Only the start page was requested
    assert_eq!(fetcher.completed(), vec![START_PAGE.to_string()]);
}

#[tokio::test]
async fn test_foreign_domain_yields_single_entry() {
    let fetcher = Arc::new(ScriptedFetcher::new().page(
        START_PAGE,
        ok_page(
            START_PAGE,
            &[],
            &start_page_body("https://apply.example.org/<script>"),
        ),
    ));
    let report = checker(fetcher.clone())
        .run_service_check("/apply-for-thing")
        .await;

    assert_eq!(report.entries.len(), 1);
    let entry = &report.entries[0];
    assert_eq!(
        entry.title,
        "The GOV.UK start page should link to service on a service.gov.uk domain"
    );
    assert!(!entry.description.contains("<script>"));
    assert_eq!(fetcher.completed().len(), 1);
}

#[tokio::test]
async fn test_failing_probe_does_not_affect_others() {
    let fetcher = Arc::new(compliant_service().error(
        LINK,
        FetchError::Transport {
            url: LINK.to_string(),
            detail: "connection reset".to_string(),
        },
    ));
    let report = checker(fetcher).run_service_check("/apply-for-thing").await;

    assert_eq!(report.entries.len(), 6);
    let failed: Vec<&str> = report.failures().map(|e| e.title.as_str()).collect();
    assert_eq!(
        failed,
        vec![ProbeKind::Hsts.title(), ProbeKind::Cookies.title()]
    );
    for entry in report.failures() {
        assert!(entry.description.contains("connection reset"));
    }
}

#[tokio::test]
async fn test_insecure_service_fails_expected_probes() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .page(
                START_PAGE,
                ok_page(
                    START_PAGE,
                    &[],
                    &start_page_body("https://foo.service.gov.uk/start"),
                ),
            )
            .page(
                "https://foo.service.gov.uk/",
                ok_page("https://foo.service.gov.uk/", &[], ""),
            )
            .page(
                "http://foo.service.gov.uk/",
                ok_page("http://foo.service.gov.uk/", &[], "plain"),
            )
            .page(
                "https://foo.service.gov.uk/start",
                ok_page(
                    "https://foo.service.gov.uk/start",
                    &["set-cookie: id=1"],
                    "",
                ),
            ),
    );
    let report = checker(fetcher).run_service_check("/apply-for-thing").await;

    assert_eq!(report.entries.len(), 6);
    assert!(report.entries.iter().all(|e| !e.passed), "{:#?}", report.entries);
}
