//! Axum middleware driving the filter chain around the inner service.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::cors::chain::FilterChain;
use crate::cors::context::RequestContext;
use crate::cors::headers::{ACCESS_CONTROL_REQUEST_METHOD, ORIGIN};
use crate::cors::policy::CorsPolicy;
use crate::observability::metrics::{self, RouteLabel};

/// State required by [`cors_filter_middleware`].
#[derive(Clone, Debug)]
pub struct CorsFilterState {
    pub chain: Arc<FilterChain>,
    pub answer_preflight: bool,
}

impl CorsFilterState {
    pub fn new(policy: Arc<CorsPolicy>) -> Self {
        Self {
            answer_preflight: policy.answers_preflight(),
            chain: Arc::new(FilterChain::new(policy)),
        }
    }
}

/// A browser preflight: `OPTIONS` with both `Origin` and
/// `Access-Control-Request-Method`.
pub fn is_preflight(request: &Request<Body>) -> bool {
    request.method() == Method::OPTIONS
        && request.headers().contains_key(ORIGIN)
        && request.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}

pub async fn cors_filter_middleware(
    State(state): State<CorsFilterState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    // Captured before the stripper removes Origin.
    let ctx = RequestContext::capture(request.headers());

    let preflight = state.answer_preflight && is_preflight(&request);
    let mut response = if preflight {
        tracing::debug!(
            request_id = %ctx.request_id(),
            origin = %ctx.origin_for_log(),
            "Answering CORS preflight at the gateway"
        );
        StatusCode::NO_CONTENT.into_response()
    } else {
        state.chain.apply_request(&ctx, request.headers_mut());
        request.extensions_mut().insert(ctx.clone());
        next.run(request).await
    };

    state.chain.apply_response(&ctx, response.headers_mut());

    let route = match response.extensions().get::<RouteLabel>() {
        Some(RouteLabel(name)) => name.as_str(),
        None if preflight => "preflight",
        None => "gateway",
    };
    metrics::record_request(method.as_str(), response.status().as_u16(), route, start);
    response
}
