//! Outbound page fetching.
//!
//! Every network request the engine makes goes through [`PageFetcher`]. The
//! production implementation is [`HttpFetcher`]; tests supply their own to
//! simulate latency, failures, and hosts that cannot be reached from a test
//! machine.

mod http;
#[cfg(test)]
pub(crate) mod stub;

use std::time::Duration;

use async_trait::async_trait;

use crate::error_handling::{FetchError, MalformedHeaderError};
use crate::headers::{parse_header_lines, HeaderMap};

pub use http::HttpFetcher;

/// A successfully fetched response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL of the final response after following redirects
    pub final_url: String,
    /// HTTP status of the final response
    pub status: u16,
    /// Response headers as `"name: value"` lines, in order, duplicates kept
    pub header_lines: Vec<String>,
    /// Response body decoded as text (possibly truncated)
    pub body: String,
}

impl FetchedPage {
    /// Case-insensitive header lookup map (last occurrence wins).
    ///
    /// # Errors
    ///
    /// Returns [`MalformedHeaderError`] if a header line lacks the `": "` separator.
    pub fn headers(&self) -> Result<HeaderMap, MalformedHeaderError> {
        parse_header_lines(&self.header_lines)
    }
}

/// Fetches a URL, following redirects.
///
/// Implementations must report a final 4xx/5xx response as
/// [`FetchError::Status`] carrying the final URL, and must map refused
/// connections and timeouts to [`FetchError::Connect`] and
/// [`FetchError::Timeout`]; probes rely on that distinction.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`. `timeout`, when given, replaces the default request timeout.
    async fn fetch(&self, url: &str, timeout: Option<Duration>)
        -> Result<FetchedPage, FetchError>;

    /// Like [`fetch`](PageFetcher::fetch) but stops once the headers arrive.
    ///
    /// The returned page has an empty body. The default fetches the whole
    /// page and drops the body; [`HttpFetcher`] returns before reading it, so
    /// a server that answers and then stalls mid-body still yields a page.
    async fn fetch_headers(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<FetchedPage, FetchError> {
        let page = self.fetch(url, timeout).await?;
        Ok(FetchedPage {
            body: String::new(),
            ..page
        })
    }
}

#[cfg(test)]
mod tests {
    use super::stub::{page, StubFetcher};
    use super::*;

    #[tokio::test]
    async fn test_default_fetch_headers_drops_body() {
        let fetcher = StubFetcher::new().with_page(
            "https://a.service.gov.uk/",
            page("https://a.service.gov.uk/", &["content-type: text/html"], "<html></html>"),
        );
        let page = fetcher
            .fetch_headers("https://a.service.gov.uk/", None)
            .await
            .unwrap();
        assert!(page.body.is_empty());
        assert_eq!(page.header_lines, ["content-type: text/html"]);
    }
}
