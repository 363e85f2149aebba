//! HTML escaping for report descriptions.

use std::borrow::Cow;

/// Escapes text from untrusted sources (headers, URLs, error messages) before
/// it is placed inside description markup.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}
