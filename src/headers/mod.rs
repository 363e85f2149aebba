//! Raw HTTP header line parsing.
//!
//! Probes receive response headers as the ordered `"Name: value"` lines the
//! server sent. [`parse_header_lines`] folds them into a case-insensitive map
//! for lookups; probes that need every occurrence of a repeated header (such
//! as `Set-Cookie`) walk the lines with [`split_header_line`] instead.

use std::collections::HashMap;

use crate::error_handling::MalformedHeaderError;

/// Lower-cased header name to raw value, last occurrence wins.
pub type HeaderMap = HashMap<String, String>;

const HEADER_SEPARATOR: &str = ": ";

/// Splits one header line on the first `": "`.
///
/// The name is lower-cased and trailing whitespace is removed from the value.
///
/// # Errors
///
/// Returns [`MalformedHeaderError`] when the line has no `": "` separator.
pub fn split_header_line(line: &str) -> Result<(String, String), MalformedHeaderError> {
    let (name, value) = line
        .split_once(HEADER_SEPARATOR)
        .ok_or_else(|| MalformedHeaderError {
            line: line.to_string(),
        })?;
    Ok((name.to_lowercase(), value.trim_end().to_string()))
}

/// Builds a [`HeaderMap`] from raw header lines.
///
/// Fails on the first malformed line; the caller is expected to pass lines
/// produced by an HTTP client, so a malformed one is an internal error.
///
/// # Examples
///
/// ```
/// use service_check::headers::parse_header_lines;
///
/// let headers = parse_header_lines(["Content-Type: text/plain", "X-Foo: bar "]).unwrap();
/// assert_eq!(headers["content-type"], "text/plain");
/// assert_eq!(headers["x-foo"], "bar");
/// ```
pub fn parse_header_lines<I, S>(lines: I) -> Result<HeaderMap, MalformedHeaderError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers = HeaderMap::new();
    for line in lines {
        let (name, value) = split_header_line(line.as_ref())?;
        headers.insert(name, value);
    }
    Ok(headers)
}
