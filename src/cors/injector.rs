//! Gateway CORS header injector.
//!
//! # Responsibilities
//! - Decide `Access-Control-Allow-Origin` from the client's original
//!   `Origin` (read from [`RequestContext`], not from the forwarded request)
//! - Write the canonical CORS header set onto the response
//!
//! # Design Decisions
//! - If `Access-Control-Allow-Origin` is already present nothing is added,
//!   so running the injector twice is the same as running it once
//! - The set is written with `insert`, never `append`

use std::sync::Arc;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE,
};
use axum::http::HeaderMap;

use crate::cors::chain::GatewayFilter;
use crate::cors::context::RequestContext;
use crate::cors::policy::CorsPolicy;
use crate::observability::metrics;

#[derive(Debug, Clone)]
pub struct GatewayCorsInjector {
    policy: Arc<CorsPolicy>,
}

impl GatewayCorsInjector {
    pub fn new(policy: Arc<CorsPolicy>) -> Self {
        Self { policy }
    }
}

impl GatewayFilter for GatewayCorsInjector {
    fn name(&self) -> &'static str {
        "add-gateway-cors"
    }

    fn on_response(&self, ctx: &RequestContext, headers: &mut HeaderMap) {
        if headers.contains_key(ACCESS_CONTROL_ALLOW_ORIGIN) {
            return;
        }

        let decision = self.policy.decide(ctx.origin());
        metrics::record_cors_decision(decision.label());
        tracing::debug!(
            request_id = %ctx.request_id(),
            origin = %ctx.origin_for_log(),
            decision = decision.label(),
            "Applying gateway CORS policy"
        );

        let Some(allow_origin) = decision.allow_origin() else {
            return;
        };

        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            self.policy.allow_methods().clone(),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            self.policy.allow_headers().clone(),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            self.policy.allow_credentials().clone(),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, self.policy.max_age().clone());
        if let Some(expose) = self.policy.expose_headers() {
            headers.insert(ACCESS_CONTROL_EXPOSE_HEADERS, expose.clone());
        }
    }
}
