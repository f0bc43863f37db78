//! CORS header names handled by the gateway.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, HeaderName};

pub use axum::http::header::{ACCESS_CONTROL_REQUEST_METHOD, ORIGIN};

/// The CORS Header Set. Stripped from backend responses and written by the
/// gateway as a single unit.
pub const CORS_RESPONSE_HEADERS: [HeaderName; 6] = [
    ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ACCESS_CONTROL_MAX_AGE,
    ACCESS_CONTROL_EXPOSE_HEADERS,
];

/// Number of CORS Header Set members present in `headers`.
pub fn present_count(headers: &HeaderMap) -> usize {
    CORS_RESPONSE_HEADERS
        .iter()
        .filter(|name| headers.contains_key(*name))
        .count()
}
