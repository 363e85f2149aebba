//! Slug normalization.

use crate::config::MAX_SLUG_LENGTH;
use crate::error_handling::ResolveError;

/// Normalizes a user-supplied slug into a path on the content site.
///
/// - Surrounding whitespace is trimmed
/// - A missing leading `/` is added
/// - A full start page URL on the content site is reduced to its path and query
///
/// # Errors
///
/// Returns `ResolveError::InvalidSlug` for an empty slug, a slug longer than
/// `MAX_SLUG_LENGTH`, or a URL pointing at a different host than `content_root`.
pub fn normalize_slug(slug: &str, content_root: &str) -> Result<String, ResolveError> {
    let trimmed = slug.trim();
    let invalid = |reason: &str| ResolveError::InvalidSlug {
        slug: slug.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.len() > MAX_SLUG_LENGTH {
        return Err(invalid("longer than the maximum URL length"));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let parsed = url::Url::parse(trimmed).map_err(|_| invalid("not a valid URL"))?;
        let root_host = url::Url::parse(content_root)
            .ok()
            .and_then(|root| root.host_str().map(str::to_string));
        if parsed.host_str().map(str::to_string) != root_host {
            return Err(invalid("URL is not on the content site"));
        }
        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }
        return finish(path, invalid);
    }

    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    finish(path, invalid)
}

fn finish(
    path: String,
    invalid: impl Fn(&str) -> ResolveError,
) -> Result<String, ResolveError> {
    if path.trim_start_matches('/').is_empty() {
        Err(invalid("empty path"))
    } else {
        Ok(path)
    }
}
