//! Canned-response fetcher for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{FetchedPage, PageFetcher};
use crate::error_handling::FetchError;

#[derive(Default)]
pub(crate) struct StubFetcher {
    responses: HashMap<String, Result<FetchedPage, FetchError>>,
    requests: Mutex<Vec<(String, Option<Duration>)>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, page: FetchedPage) -> Self {
        self.responses.insert(url.to_string(), Ok(page));
        self
    }

    pub(crate) fn with_error(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<(String, Option<Duration>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<FetchedPage, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), timeout));
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Connect {
                    url: url.to_string(),
                    detail: "connection refused".to_string(),
                })
            })
    }
}

/// A 200 response at `final_url` with the given header lines.
pub(crate) fn page(final_url: &str, header_lines: &[&str], body: &str) -> FetchedPage {
    FetchedPage {
        final_url: final_url.to_string(),
        status: 200,
        header_lines: header_lines.iter().map(|l| l.to_string()).collect(),
        body: body.to_string(),
    }
}
