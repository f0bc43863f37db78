//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, route
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_cors_decisions_total` (counter): echo / wildcard / omit
//! - `gateway_downstream_cors_stripped_total` (counter): backend CORS headers removed
//! - `gateway_fallback_responses_total` (counter): fallbacks by service
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.
//! `gateway_requests_total` is recorded once per response by the CORS
//! middleware; handlers tag the response with a [`RouteLabel`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Response extension naming the route a request was served by.
#[derive(Debug, Clone)]
pub struct RouteLabel(pub String);

pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("route", route.to_string()),
    ];
    counter!("gateway_requests_total", &labels).increment(1);
    histogram!("gateway_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

pub fn record_cors_decision(decision: &'static str) {
    counter!("gateway_cors_decisions_total", "decision" => decision).increment(1);
}

pub fn record_downstream_cors_stripped(count: usize) {
    counter!("gateway_downstream_cors_stripped_total").increment(count as u64);
}

pub fn record_fallback(service: &str) {
    counter!("gateway_fallback_responses_total", "service" => service.to_string()).increment(1);
}
