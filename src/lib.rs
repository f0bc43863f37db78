//! API gateway CORS normalization library.
//!
//! Strips CORS headers set by backend services and re-injects a single,
//! gateway-controlled CORS header set; serves degraded-service responses
//! when a backend is unreachable.

pub mod config;
pub mod cors;
pub mod fallback;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
