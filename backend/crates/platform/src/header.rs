//! Header Extraction
//!
//! Helpers for reading credentials carried in request headers.

use axum::http::HeaderMap;

/// Extract a non-empty header value as a string
///
/// Values that are not visible ASCII, or are blank after trimming the
/// surrounding whitespace, are treated as absent. The value itself is
/// returned untrimmed.
pub fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(value.to_string())
}
