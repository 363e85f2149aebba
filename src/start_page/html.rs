//! Start page markup extraction.
//!
//! Two independent strategies, tried in order:
//! 1. An anchor inside a `.get-started` container whose text is "Start now"
//! 2. A `form.get-started`, whose `action` is the entry point
//!
//! Markup comes from a third party. Absence of either element is a normal
//! negative result, and malformed HTML is parsed leniently by `scraper`.

use std::sync::LazyLock;

use scraper::{Html, Selector};

// CSS selector strings
const GET_STARTED_LINK_SELECTOR_STR: &str = ".get-started a";
const GET_STARTED_FORM_SELECTOR_STR: &str = "form.get-started";

const START_NOW_TEXT: &str = "Start now";

static GET_STARTED_LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(GET_STARTED_LINK_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse get-started link selector '{}': {}",
            GET_STARTED_LINK_SELECTOR_STR,
            e
        );
        crate::utils::parse_selector_unsafe("*:not(*)", "GET_STARTED_LINK_SELECTOR fallback")
    })
});

static GET_STARTED_FORM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(GET_STARTED_FORM_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse get-started form selector '{}': {}",
            GET_STARTED_FORM_SELECTOR_STR,
            e
        );
        crate::utils::parse_selector_unsafe("*:not(*)", "GET_STARTED_FORM_SELECTOR fallback")
    })
});

/// First "Start now" anchor `href` inside a `.get-started` container.
///
/// The anchor's text must be exactly "Start now". Anchors without a
/// non-empty `href` are skipped.
pub fn find_start_now_link(document: &Html) -> Option<String> {
    document
        .select(&GET_STARTED_LINK_SELECTOR)
        .filter(|anchor| anchor.text().collect::<String>() == START_NOW_TEXT)
        .find_map(|anchor| non_empty_attr(anchor.value().attr("href")))
}

/// `action` of the first `form.get-started` that has one.
pub fn find_get_started_form(document: &Html) -> Option<String> {
    document
        .select(&GET_STARTED_FORM_SELECTOR)
        .find_map(|form| non_empty_attr(form.value().attr("action")))
}

/// Extracts the entry link from start page markup.
///
/// Tries the "Start now" link first and falls back to the get-started form.
/// The first match in document order wins. Relative links are resolved
/// against `page_url`; a link that cannot be resolved is returned as found so
/// that domain validation can reject it with the raw value.
///
/// The parsed document never outlives this call, so callers can hold the
/// result across `.await` points in `Send` futures.
pub fn extract_entry_link(html: &str, page_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let raw = find_start_now_link(&document).or_else(|| find_get_started_form(&document))?;

    let resolved = url::Url::parse(page_url)
        .and_then(|base| base.join(&raw))
        .map(|joined| joined.to_string())
        .unwrap_or(raw);
    Some(resolved)
}

fn non_empty_attr(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.gov.uk/lasting-power-of-attorney";

    #[test]
    fn test_start_now_link() {
        let html = r#"
            <html><body>
              <section class="get-started group">
                <a href="https://lastingpowerofattorney.service.gov.uk/" class="button">Start now</a>
              </section>
            </body></html>"#;
        assert_eq!(
            extract_entry_link(html, PAGE_URL).as_deref(),
            Some("https://lastingpowerofattorney.service.gov.uk/")
        );
    }

    #[test]
    fn test_start_now_text_is_not_trimmed() {
        let html = r#"<div class="get-started"><a href="https://a.service.gov.uk/">
            Start now
        </a></div>"#;
        assert_eq!(extract_entry_link(html, PAGE_URL), None);
    }

    #[test]
    fn test_start_now_text_must_match_exactly() {
        let html = r#"<div class="get-started">
            <a href="https://wrong.service.gov.uk/">Start now (opens in new tab)</a>
            <a href="https://wrong.service.gov.uk/">start now</a>
        </div>"#;
        assert_eq!(extract_entry_link(html, PAGE_URL), None);
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"<div class="get-started">
            <a href="https://first.service.gov.uk/">Start now</a>
            <a href="https://second.service.gov.uk/">Start now</a>
        </div>"#;
        assert_eq!(
            extract_entry_link(html, PAGE_URL).as_deref(),
            Some("https://first.service.gov.uk/")
        );
    }

    #[test]
    fn test_anchor_outside_container_is_ignored() {
        let html = r#"<a href="https://outside.service.gov.uk/">Start now</a>"#;
        assert_eq!(extract_entry_link(html, PAGE_URL), None);
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<div class="get-started">
            <a>Start now</a>
            <a href="https://next.service.gov.uk/">Start now</a>
        </div>"#;
        assert_eq!(
            extract_entry_link(html, PAGE_URL).as_deref(),
            Some("https://next.service.gov.uk/")
        );
    }

    #[test]
    fn test_form_fallback() {
        let html = r#"<form class="get-started" action="https://form.service.gov.uk/start" method="post">
            <button type="submit">Start now</button>
        </form>"#;
        assert_eq!(
            extract_entry_link(html, PAGE_URL).as_deref(),
            Some("https://form.service.gov.uk/start")
        );
    }

    #[test]
    fn test_link_preferred_over_form() {
        let html = r#"
            <form class="get-started" action="https://form.service.gov.uk/"></form>
            <p class="get-started"><a href="https://link.service.gov.uk/">Start now</a></p>"#;
        assert_eq!(
            extract_entry_link(html, PAGE_URL).as_deref(),
            Some("https://link.service.gov.uk/")
        );
    }

    #[test]
    fn test_relative_link_resolved_against_page() {
        let html = r#"<div class="get-started"><a href="/apply">Start now</a></div>"#;
        assert_eq!(
            extract_entry_link(html, PAGE_URL).as_deref(),
            Some("https://www.gov.uk/apply")
        );
    }

    #[test]
    fn test_no_match() {
        let html = "<html><body><h1>Bank holidays</h1><a href='/x'>Start now</a></body></html>";
        assert_eq!(extract_entry_link(html, PAGE_URL), None);
    }

    #[test]
    fn test_malformed_markup_is_not_an_error() {
        let html = "<div class='get-started'><a href='https://x.service.gov.uk/'>Start now</div><<<>";
        assert_eq!(
            extract_entry_link(html, PAGE_URL).as_deref(),
            Some("https://x.service.gov.uk/")
        );
        assert_eq!(extract_entry_link("", PAGE_URL), None);
        assert_eq!(extract_entry_link("\u{0}\u{fffd}<<", PAGE_URL), None);
    }
}
