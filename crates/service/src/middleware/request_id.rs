//! Correlation IDs for every request.
//!
//! A caller may pass its own `x-request-id`; it is kept only when it is a
//! short token of visible ASCII, so nothing odd is echoed into logs or
//! response headers. Anything else is replaced by a fresh UUID v4.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied request ID that is reused.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Attach a request ID to the request span, the Sentry scope and the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(request.headers())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// The caller's request ID, if present and acceptable.
fn incoming_request_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(REQUEST_ID_HEADER)?.as_bytes();

    if raw.is_empty()
        || raw.len() > MAX_REQUEST_ID_LEN
        || !raw.iter().all(u8::is_ascii_graphic)
    {
        return None;
    }

    std::str::from_utf8(raw).ok().map(str::to_owned)
}
