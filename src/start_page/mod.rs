//! Entry link resolution.
//!
//! A check starts from a start page on the content site. This module fetches
//! that page once and extracts the outbound link to the service it introduces.

mod html;
mod slug;

use log::{debug, info};

use crate::error_handling::ResolveError;
use crate::fetch::PageFetcher;

pub use html::{extract_entry_link, find_get_started_form, find_start_now_link};
pub use slug::normalize_slug;

/// Absolute start page URL for a normalized slug.
pub fn start_page_url(content_root: &str, slug: &str) -> String {
    format!("{}{}", content_root.trim_end_matches('/'), slug)
}

/// Fetches the start page for `slug` and returns the service's entry link.
///
/// `slug` must already be normalized (leading `/`). Relative links are
/// resolved against the start page's final URL.
///
/// # Errors
///
/// - `ResolveError::Unreachable` if the page cannot be fetched (transport
///   failure or error status)
/// - `ResolveError::NoStartLink` if the page has neither a "Start now" link
///   nor a get-started form
pub async fn resolve_entry_link(
    fetcher: &dyn PageFetcher,
    content_root: &str,
    slug: &str,
) -> Result<String, ResolveError> {
    let url = start_page_url(content_root, slug);
    debug!("Fetching start page {}", url);

    let page = fetcher
        .fetch(&url, None)
        .await
        .map_err(|source| ResolveError::Unreachable {
            url: url.clone(),
            source,
        })?;

    match extract_entry_link(&page.body, &page.final_url) {
        Some(link) => {
            info!("Start page {} links to {}", url, link);
            Ok(link)
        }
        None => Err(ResolveError::NoStartLink { url }),
    }
}
