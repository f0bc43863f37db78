//! Request-scoped state threaded between filter stages.

use axum::http::{HeaderMap, HeaderValue};

use crate::cors::headers::ORIGIN;
use crate::http::request::X_REQUEST_ID;

/// Per-request view captured at request entry, before any filter runs.
///
/// The stripper deletes `Origin` from the forwarded request, but the
/// injector still needs the client's value; it reads it from here.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    origin: Option<HeaderValue>,
    request_id: Option<String>,
}

impl RequestContext {
    /// Capture the original client headers the filters depend on.
    pub fn capture(headers: &HeaderMap) -> Self {
        Self {
            origin: headers.get(ORIGIN).cloned(),
            request_id: headers
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        }
    }

    /// The client's original `Origin` header value.
    pub fn origin(&self) -> Option<&HeaderValue> {
        self.origin.as_ref()
    }

    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("unknown")
    }

    /// Origin rendered for log fields.
    pub fn origin_for_log(&self) -> &str {
        self.origin
            .as_ref()
            .map(|v| v.to_str().unwrap_or("<non-ascii>"))
            .unwrap_or("<none>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture() {
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static("http://localhost:3000"));
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));

        let ctx = RequestContext::capture(&headers);

        // Capturing is a copy; later mutation of the map does not affect it.
        headers.remove(ORIGIN);
        assert_eq!(ctx.origin().unwrap(), "http://localhost:3000");
        assert_eq!(ctx.request_id(), "abc-123");
    }

    #[test]
    fn test_capture_empty() {
        let ctx = RequestContext::capture(&HeaderMap::new());
        assert!(ctx.origin().is_none());
        assert_eq!(ctx.request_id(), "unknown");
        assert_eq!(ctx.origin_for_log(), "<none>");
    }
}
