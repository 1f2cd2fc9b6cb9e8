//! Bearer Token Extraction
//!
//! Common handling for the `Authorization: Bearer <token>` scheme.

use axum::http::{HeaderMap, header};

/// Scheme prefix, case-sensitive per RFC 6750 usage in the wild
const BEARER_PREFIX: &str = "Bearer ";

/// Extract a bearer token from request headers.
///
/// Returns `None` when the `Authorization` header is absent, is not valid
/// ASCII, does not use the `Bearer` scheme, or carries an empty token.
/// Callers decide whether a missing token is an error.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();

    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(extract_bearer(&headers), Some("abc123"));
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_wrong_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_lowercase_scheme_rejected() {
        let headers = headers_with("bearer abc123");
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_empty_token() {
        let headers = headers_with("Bearer ");
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let headers = headers_with("Bearer abc123  ");
        assert_eq!(extract_bearer(&headers), Some("abc123"));
    }
}
