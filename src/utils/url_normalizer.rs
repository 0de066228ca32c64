//! Target URL normalization.
//!
//! Callers may omit the scheme (`example.com/page`); such input is stored as
//! `https://example.com/page`. Apart from trimming surrounding whitespace the
//! caller's text is kept verbatim, so a redirect lands on exactly what was
//! submitted.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is required")]
    Empty,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),
}

/// Normalizes a caller-supplied target URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed; nothing left is an error
/// 2. Control characters inside the URL are rejected
/// 3. `http://` and `https://` prefixes (any case) are kept as given
/// 4. Any other explicit `scheme://` is rejected
/// 5. Otherwise `https://` is prepended
/// 6. The result must parse as an absolute URL with a host
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://example.com/a").unwrap(), "http://example.com/a");
/// assert!(normalize_url("ftp://example.com").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    // `Url::parse` silently drops tabs and newlines, but the stored text must
    // be usable verbatim as a `Location` header.
    if trimmed.chars().any(char::is_control) {
        return Err(UrlNormalizationError::InvalidFormat(
            "URL contains control characters".to_string(),
        ));
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else if has_explicit_scheme(trimmed) {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    } else {
        format!("https://{}", trimmed)
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::InvalidFormat(
            "missing host".to_string(),
        ));
    }

    Ok(candidate)
}

/// Returns true for input shaped like `scheme://...` per RFC 3986 scheme syntax.
fn has_explicit_scheme(input: &str) -> bool {
    input.find("://").is_some_and(|idx| {
        let scheme = &input[..idx];
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
