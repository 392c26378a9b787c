use axum::extract::{MatchedPath, Request};
use tracing::Span;

/// Route template for the request, e.g. `/api/v1/members/{target_user_code}`.
/// Falls back to the bare path when no route matched. The query string is never included.
pub fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// `make_span_with` for the HTTP trace layer. Authorization codes travel in the
/// URI, so the span records the route template instead of the full URI.
pub fn request_span(request: &Request) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        route = %route_label(request),
        version = ?request.version(),
    )
}
