//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Gateway-controlled CORS policy.
    pub cors: CorsConfig,

    /// Route definitions mapping path prefixes to upstreams.
    pub routes: Vec<RouteConfig>,

    /// Degraded-service responders.
    pub fallback: FallbackConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// What the gateway emits for an origin that is absent or not allow-listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnlistedOrigin {
    /// `Access-Control-Allow-Origin: *` plus the rest of the header set.
    #[default]
    Wildcard,
    /// No CORS headers at all.
    Omit,
}

/// CORS configuration.
///
/// The allow-list is read once at startup and never changes afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins (scheme://host[:port]) that are echoed back verbatim.
    pub allowed_origins: Vec<String>,

    /// Value list for `Access-Control-Allow-Methods`.
    pub allowed_methods: Vec<String>,

    /// Value list for `Access-Control-Allow-Headers`.
    pub allowed_headers: Vec<String>,

    /// Value list for `Access-Control-Expose-Headers` (omitted when empty).
    pub expose_headers: Vec<String>,

    /// Value for `Access-Control-Allow-Credentials`.
    pub allow_credentials: bool,

    /// Value for `Access-Control-Max-Age`, in seconds.
    pub max_age_secs: u64,

    /// Behaviour for origins outside the allow-list.
    pub unlisted_origin: UnlistedOrigin,

    /// Answer `OPTIONS` preflights at the gateway instead of forwarding them.
    pub answer_preflight: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://192.168.1.7:3000".to_string(),
                "http://192.168.1.7:3001".to_string(),
                "http://192.168.1.7:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
                "http://localhost:5173".to_string(),
            ],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowed_headers: vec!["*".to_string()],
            expose_headers: Vec::new(),
            allow_credentials: true,
            max_age_secs: 3600,
            unlisted_origin: UnlistedOrigin::Wildcard,
            answer_preflight: true,
        }
    }
}

/// Route configuration mapping a path prefix to an upstream service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Path prefix to match.
    pub path_prefix: String,

    /// Upstream base URL (e.g., "http://127.0.0.1:9001").
    pub upstream: String,

    /// Fallback service id used when the upstream is unreachable.
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Fallback responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Known backend families, addressable as `/fallback/{id}`.
    pub services: Vec<FallbackServiceConfig>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            services: vec![
                FallbackServiceConfig::new("auth", "Auth"),
                FallbackServiceConfig::new("students", "Student"),
                FallbackServiceConfig::new("teachers", "Teacher"),
            ],
        }
    }
}

/// A single backend family with a degraded-service message.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackServiceConfig {
    /// Path segment under `/fallback/`.
    pub id: String,

    /// Human-readable family name used in the message.
    pub display_name: String,
}

impl FallbackServiceConfig {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for the upstream to produce response headers, in seconds.
    pub upstream_secs: u64,

    /// Overall request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
