// Shared test helpers: a scripted in-memory fetcher and start page fixtures.
//
// Probes target `https://<name>.service.gov.uk`, which a test machine cannot
// reach, so orchestration tests run against `ScriptedFetcher` instead of the
// network.

#![allow(dead_code)] // Not every test file uses every helper

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use service_check::{FetchError, FetchedPage, PageFetcher};

pub const START_PAGE: &str = "https://www.gov.uk/apply-for-thing";
pub const DOMAIN: &str = "www.foo.service.gov.uk";
pub const LINK: &str = "https://www.foo.service.gov.uk/start";
pub const SECURE_ROOT: &str = "https://www.foo.service.gov.uk/";
pub const ROBOTS: &str = "https://www.foo.service.gov.uk/robots.txt";

struct Scripted {
    response: Result<FetchedPage, FetchError>,
    delay: Duration,
}

/// Serves canned responses per URL, optionally after a delay.
///
/// Unknown URLs fail with a refused connection. Completed requests are
/// recorded in the order they finished.
#[derive(Default)]
pub struct ScriptedFetcher {
    script: HashMap<String, Scripted>,
    completed: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, page: FetchedPage) -> Self {
        self.page_after(url, page, Duration::ZERO)
    }

    pub fn page_after(mut self, url: &str, page: FetchedPage, delay: Duration) -> Self {
        self.script.insert(
            url.to_string(),
            Scripted {
                response: Ok(page),
                delay,
            },
        );
        self
    }

    pub fn error(mut self, url: &str, error: FetchError) -> Self {
        self.script.insert(
            url.to_string(),
            Scripted {
                response: Err(error),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(
        &self,
        url: &str,
        _timeout: Option<Duration>,
    ) -> Result<FetchedPage, FetchError> {
        let result = match self.script.get(url) {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.response.clone()
            }
            None => Err(FetchError::Connect {
                url: url.to_string(),
                detail: "connection refused".to_string(),
            }),
        };
        self.completed.lock().unwrap().push(url.to_string());
        result
    }
}

/// A 200 response at `final_url`.
pub fn ok_page(final_url: &str, header_lines: &[&str], body: &str) -> FetchedPage {
    FetchedPage {
        final_url: final_url.to_string(),
        status: 200,
        header_lines: header_lines.iter().map(|l| l.to_string()).collect(),
        body: body.to_string(),
    }
}

/// Start page markup with a "Start now" link to `href`.
pub fn start_page_body(href: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><body><main>
<p class="get-started group"><a href="{href}" class="button" role="button">Start now</a></p>
</main></body></html>"#
    )
}

/// Responses for a service that satisfies every probe.
pub fn compliant_service() -> ScriptedFetcher {
    compliant_service_with_delays(Duration::ZERO, Duration::ZERO)
}

/// Like [`compliant_service`], with separate delays for the bare domain and
/// for every other probe request.
pub fn compliant_service_with_delays(bare_domain: Duration, others: Duration) -> ScriptedFetcher {
    ScriptedFetcher::new()
        .page(START_PAGE, ok_page(START_PAGE, &[], &start_page_body(LINK)))
        .page_after(SECURE_ROOT, ok_page(START_PAGE, &[], ""), bare_domain)
        .page_after(
            LINK,
            ok_page(
                LINK,
                &[
                    "strict-transport-security: max-age=31536000",
                    "set-cookie: session=abc; Secure; HttpOnly; Domain=www.foo.service.gov.uk",
                ],
                "<html></html>",
            ),
            others,
        )
        .page_after(
            ROBOTS,
            ok_page(ROBOTS, &["content-type: text/plain"], "User-agent: *\n"),
            others,
        )
}
