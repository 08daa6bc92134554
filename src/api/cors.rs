//! Allowed-origin patterns shared by the CORS layer and the origin guard.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use super::ApiError;

#[derive(Debug, Clone, Default)]
pub struct OriginPatterns {
    patterns: Vec<String>,
}

impl OriginPatterns {
    /// Parses a comma-separated list; blanks are ignored.
    #[must_use]
    pub fn parse(csv: &str) -> Self {
        let patterns = csv
            .split(',')
            .map(|p| p.trim().trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.patterns
            .iter()
            .any(|pattern| wildcard_match(pattern, origin))
    }

    /// tower-http layer answering preflights and echoing allowed origins.
    #[must_use]
    pub fn layer(self: &Arc<Self>) -> CorsLayer {
        let patterns = Arc::clone(self);
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _parts: &Parts| {
                    origin.to_str().is_ok_and(|o| patterns.allows(o))
                },
            ))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    }
}

/// `*` matches any run of characters, everything else is literal.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern.eq_ignore_ascii_case(text);
    }

    let pattern = pattern.to_ascii_lowercase();
    let text = text.to_ascii_lowercase();
    let mut parts = pattern.split('*');

    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }

    rest.len() >= last.len() && rest.ends_with(last)
}

/// A request whose `Origin` matches its own `Host` is same-origin.
fn is_same_origin(origin: &str, headers: &axum::http::HeaderMap) -> bool {
    let authority = origin.split_once("://").map_or(origin, |(_, rest)| rest);
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|host| host.eq_ignore_ascii_case(authority))
}

/// Rejects cross-origin requests from origins outside the allowed patterns.
pub async fn origin_guard(
    State(patterns): State<Arc<OriginPatterns>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(origin) = origin
        && !patterns.allows(&origin)
        && !is_same_origin(&origin, request.headers())
    {
        tracing::warn!(origin = %origin, "Rejected cross-origin request");
        return ApiError::invalid_cors_request().into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_csv() {
        let patterns = OriginPatterns::parse(" http://localhost:8080 , ,https://erudio.com.br/");
        assert!(patterns.allows("http://localhost:8080"));
        assert!(patterns.allows("https://erudio.com.br"));
        assert!(!patterns.allows("https://semeru.com.br"));
    }

    #[test]
    fn wildcard_patterns() {
        assert!(wildcard_match("*", "https://anything.example"));
        assert!(wildcard_match("https://*.example.com", "https://api.example.com"));
        assert!(!wildcard_match("https://*.example.com", "https://example.com"));
        assert!(wildcard_match("http://localhost:*", "http://localhost:3000"));
        assert!(!wildcard_match("http://localhost:*", "https://localhost:3000"));
        assert!(wildcard_match("https://*.example.*", "https://a.example.org"));
        assert!(wildcard_match("HTTP://LOCALHOST:8080", "http://localhost:8080"));
    }

    #[test]
    fn empty_list_allows_nothing() {
        let patterns = OriginPatterns::parse("");
        assert!(!patterns.allows("http://localhost:8080"));
    }

    #[test]
    fn same_origin_by_host() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8888"));
        assert!(is_same_origin("http://localhost:8888", &headers));
        assert!(!is_same_origin("https://semeru.com.br", &headers));
    }
}
