//! `reqwest`-backed [`PageFetcher`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::{FetchedPage, PageFetcher};
use crate::config::{Config, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{categorize_reqwest_error, FetchError, InitializationError};
use crate::initialization::init_client;

/// Fetches pages over the network with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
}

impl HttpFetcher {
    /// Wraps an existing client. Redirect following and timeouts are taken from it.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }

    /// Builds a fetcher with a client configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self::new(init_client(config)?))
    }
}

impl HttpFetcher {
    /// Sends the request and returns the response once its headers arrived.
    async fn send(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<(reqwest::Response, FetchedPage), FetchError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(url, &e))?;

        let final_url = response.url().to_string();
        let status = response.status();
        debug!("GET {} -> {} ({})", url, status.as_u16(), final_url);

        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::status(final_url, status.as_u16()));
        }

        // reqwest yields one entry per occurrence, so repeated Set-Cookie headers survive
        let header_lines = response
            .headers()
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}: {}",
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes())
                )
            })
            .collect();

        let page = FetchedPage {
            final_url,
            status: status.as_u16(),
            header_lines,
            body: String::new(),
        };
        Ok((response, page))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<FetchedPage, FetchError> {
        let (mut response, page) = self.send(url, timeout).await?;
        let final_url = &page.final_url;

        // Cap body size; anything past the limit is dropped, not an error.
        // The server has already answered, so any failure here is a body
        // failure, including a timeout.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| FetchError::Body {
            url: final_url.clone(),
            detail: e.to_string(),
        })? {
            let remaining = MAX_RESPONSE_BODY_SIZE.saturating_sub(body.len());
            if chunk.len() >= remaining {
                body.extend_from_slice(&chunk[..remaining]);
                debug!(
                    "Truncated body of {} at {} bytes",
                    final_url, MAX_RESPONSE_BODY_SIZE
                );
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            body: String::from_utf8_lossy(&body).into_owned(),
            ..page
        })
    }

    async fn fetch_headers(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<FetchedPage, FetchError> {
        // Dropping the response closes the connection without reading the body
        let (_response, page) = self.send(url, timeout).await?;
        Ok(page)
    }
}
