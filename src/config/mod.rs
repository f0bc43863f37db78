//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! compiled-in defaults (GatewayConfig::default)
//!     ← optionally overridden by a TOML file
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → CorsPolicy / FallbackRegistry / RouteTable built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CorsConfig, FallbackConfig, FallbackServiceConfig, GatewayConfig, ListenerConfig,
    ObservabilityConfig, RouteConfig, TimeoutConfig, UnlistedOrigin,
};
pub use validation::ValidationError;
