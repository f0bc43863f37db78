//! Downstream CORS header stripper.
//!
//! # Responsibilities
//! - Remove `Origin` from the request forwarded upstream, so backends treat
//!   it as same-origin
//! - Remove every CORS response header a backend produced, so only the
//!   gateway decides the client-visible CORS grant
//!
//! Runs first in both phases. Absent headers are a no-op.

use axum::http::HeaderMap;

use crate::cors::chain::GatewayFilter;
use crate::cors::context::RequestContext;
use crate::cors::headers::{CORS_RESPONSE_HEADERS, ORIGIN};
use crate::observability::metrics;

#[derive(Debug, Clone, Copy, Default)]
pub struct DownstreamCorsStripper;

impl GatewayFilter for DownstreamCorsStripper {
    fn name(&self) -> &'static str {
        "strip-downstream-cors"
    }

    fn on_request(&self, _ctx: &RequestContext, headers: &mut HeaderMap) {
        headers.remove(ORIGIN);
    }

    fn on_response(&self, ctx: &RequestContext, headers: &mut HeaderMap) {
        let mut removed = 0usize;
        for name in CORS_RESPONSE_HEADERS.iter() {
            removed += headers.get_all(name).iter().count();
            headers.remove(name);
        }

        if removed > 0 {
            tracing::debug!(
                request_id = %ctx.request_id(),
                removed,
                "Stripped downstream CORS headers"
            );
            metrics::record_downstream_cors_stripped(removed);
        }
    }
}
