//! The ordered gateway filter chain.
//!
//! # Ordering
//! ```text
//! request phase:   capture context → stripper → injector → forward
//! response phase:  backend/fallback response → stripper → injector → client
//! ```
//!
//! The chain is a fixed list assembled once in [`FilterChain::new`]; there
//! is no registration at runtime. Both phases walk the list front to back,
//! so the stripper's removal always precedes the injector's addition.

use std::fmt;
use std::sync::Arc;

use axum::http::HeaderMap;

use crate::cors::context::RequestContext;
use crate::cors::injector::GatewayCorsInjector;
use crate::cors::policy::CorsPolicy;
use crate::cors::stripper::DownstreamCorsStripper;

/// A synchronous header interceptor around the forwarding step.
///
/// Filters must be total: header manipulation never fails.
pub trait GatewayFilter: Send + Sync + fmt::Debug {
    /// Stable name for logs.
    fn name(&self) -> &'static str;

    /// Mutate the headers that will be forwarded upstream.
    fn on_request(&self, _ctx: &RequestContext, _headers: &mut HeaderMap) {}

    /// Mutate the headers that will be returned to the client.
    fn on_response(&self, _ctx: &RequestContext, _headers: &mut HeaderMap) {}
}

/// Statically ordered sequence of gateway filters.
#[derive(Debug)]
pub struct FilterChain {
    filters: Vec<Box<dyn GatewayFilter>>,
}

impl FilterChain {
    /// Build the standard chain: stripper (priority 0), injector (priority 1).
    pub fn new(policy: Arc<CorsPolicy>) -> Self {
        Self {
            filters: vec![
                Box::new(DownstreamCorsStripper),
                Box::new(GatewayCorsInjector::new(policy)),
            ],
        }
    }

    /// Filter names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run the request phase over the headers to be forwarded.
    pub fn apply_request(&self, ctx: &RequestContext, headers: &mut HeaderMap) {
        for filter in &self.filters {
            filter.on_request(ctx, headers);
        }
    }

    /// Run the response phase over the headers returned to the client.
    pub fn apply_response(&self, ctx: &RequestContext, headers: &mut HeaderMap) {
        for filter in &self.filters {
            filter.on_response(ctx, headers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorsConfig, UnlistedOrigin};
    use crate::cors::headers::{present_count, CORS_RESPONSE_HEADERS, ORIGIN};
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
        ACCESS_CONTROL_MAX_AGE,
    };
    use axum::http::HeaderValue;

    fn chain_with(config: CorsConfig) -> FilterChain {
        FilterChain::new(Arc::new(CorsPolicy::from_config(&config).unwrap()))
    }

    fn chain() -> FilterChain {
        chain_with(CorsConfig::default())
    }

    fn request_with_origin(origin: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static(origin));
        headers
    }

    /// Runs both phases the way the middleware does and returns
    /// (forwarded request headers, client response headers).
    fn run(chain: &FilterChain, request: HeaderMap, backend: HeaderMap) -> (HeaderMap, HeaderMap) {
        let ctx = RequestContext::capture(&request);
        let mut forwarded = request;
        chain.apply_request(&ctx, &mut forwarded);
        let mut response = backend;
        chain.apply_response(&ctx, &mut response);
        (forwarded, response)
    }

    #[test]
    fn test_order() {
        assert_eq!(chain().names(), vec!["strip-downstream-cors", "add-gateway-cors"]);
    }

    #[test]
    fn test_allow_listed_origin_is_echoed() {
        let (forwarded, response) = run(
            &chain(),
            request_with_origin("http://localhost:3000"),
            HeaderMap::new(),
        );

        assert!(!forwarded.contains_key(ORIGIN));
        assert_eq!(response[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
        assert_eq!(response[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(response[ACCESS_CONTROL_MAX_AGE], "3600");
    }

    #[test]
    fn test_unlisted_origin_gets_wildcard() {
        let (_, response) = run(
            &chain(),
            request_with_origin("http://evil.example"),
            HeaderMap::new(),
        );
        assert_eq!(response[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let (_, response) = run(&chain(), HeaderMap::new(), HeaderMap::new());
        assert_eq!(response[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_backend_values_never_leak() {
        let mut backend = HeaderMap::new();
        backend.insert(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("http://backend-internal"),
        );
        backend.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("false"),
        );
        backend.insert(
            ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static("X-Internal"),
        );

        let (_, response) = run(&chain(), request_with_origin("http://localhost:5173"), backend);

        assert_eq!(response[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
        assert_eq!(response[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(
            response.get_all(ACCESS_CONTROL_ALLOW_ORIGIN).iter().count(),
            1
        );
        // Expose-Headers is not configured, so the backend's value is simply gone.
        assert!(!response.contains_key(ACCESS_CONTROL_EXPOSE_HEADERS));
    }

    #[test]
    fn test_set_is_all_or_nothing() {
        let strict = chain_with(CorsConfig {
            unlisted_origin: UnlistedOrigin::Omit,
            expose_headers: vec!["Authorization".into()],
            ..CorsConfig::default()
        });

        let mut backend = HeaderMap::new();
        backend.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("10"));

        let cases = [
            (request_with_origin("http://localhost:3000"), CORS_RESPONSE_HEADERS.len()),
            (request_with_origin("http://evil.example"), 0),
            (HeaderMap::new(), 0),
        ];
        for (request, expected) in cases {
            let (_, response) = run(&strict, request, backend.clone());
            assert_eq!(present_count(&response), expected);
        }
    }

    #[test]
    fn test_response_phase_twice_is_stable() {
        let chain = chain();
        let ctx = RequestContext::capture(&request_with_origin("http://localhost:3001"));

        let mut once = HeaderMap::new();
        chain.apply_response(&ctx, &mut once);

        let mut twice = once.clone();
        chain.apply_response(&ctx, &mut twice);

        assert_eq!(once, twice);
    }
}
