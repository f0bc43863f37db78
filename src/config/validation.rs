//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference existing fallbacks)
//! - Validate value ranges (timeouts > 0)
//! - Reject origins that could never match exactly
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::{CorsConfig, FallbackConfig, GatewayConfig, RouteConfig, TimeoutConfig};

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("allowed origin '{origin}' is invalid: {reason}")]
    Origin { origin: String, reason: &'static str },

    #[error("allowed origin '{0}' is listed more than once")]
    DuplicateOrigin(String),

    #[error("cors.{field} entry '{value}' is not a valid header value")]
    HeaderToken { field: &'static str, value: String },

    #[error("cors.{0} must not be empty")]
    EmptyList(&'static str),

    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route '{0}' is defined more than once")]
    DuplicateRoute(String),

    #[error("route '{name}' path prefix '{prefix}' must start with '/'")]
    PathPrefix { name: String, prefix: String },

    #[error("route '{name}' upstream '{upstream}' is invalid: {reason}")]
    Upstream {
        name: String,
        upstream: String,
        reason: &'static str,
    },

    #[error("route '{route}' references unknown fallback '{fallback}'")]
    UnknownFallback { route: String, fallback: String },

    #[error("fallback id '{0}' must be a non-empty lowercase path segment")]
    FallbackId(String),

    #[error("fallback id '{0}' is defined more than once")]
    DuplicateFallback(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    validate_cors(&config.cors, &mut errors);
    validate_fallbacks(&config.fallback, &mut errors);
    validate_routes(&config.routes, &config.fallback, &mut errors);
    validate_timeouts(&config.timeouts, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_cors(cors: &CorsConfig, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for origin in &cors.allowed_origins {
        if let Err(reason) = check_origin(origin) {
            errors.push(ValidationError::Origin {
                origin: origin.clone(),
                reason,
            });
        }
        if !seen.insert(origin.as_str()) {
            errors.push(ValidationError::DuplicateOrigin(origin.clone()));
        }
    }

    for (field, values) in [
        ("allowed_methods", &cors.allowed_methods),
        ("allowed_headers", &cors.allowed_headers),
        ("expose_headers", &cors.expose_headers),
    ] {
        for value in values {
            if value.is_empty() || HeaderValue::from_str(value).is_err() {
                errors.push(ValidationError::HeaderToken {
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    if cors.allowed_methods.is_empty() {
        errors.push(ValidationError::EmptyList("allowed_methods"));
    }
    if cors.allowed_headers.is_empty() {
        errors.push(ValidationError::EmptyList("allowed_headers"));
    }
}

/// An allow-listed origin must be exactly what a browser sends in `Origin`.
fn check_origin(origin: &str) -> Result<(), &'static str> {
    if origin.contains('*') {
        return Err("wildcards are not supported, origins match exactly");
    }
    if origin.ends_with('/') {
        return Err("trailing slash");
    }
    let url = Url::parse(origin).map_err(|_| "not a URL")?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err("scheme must be http or https");
    }
    if url.host_str().is_none() {
        return Err("missing host");
    }
    // Url normalizes an empty path to "/".
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err("must not carry a path, query or fragment");
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err("must not carry credentials");
    }
    // Browsers send a lowercase host and omit the scheme's default port.
    if url.origin().ascii_serialization() != origin {
        return Err("not in serialized form (lowercase host, no default port)");
    }
    Ok(())
}

fn validate_fallbacks(fallback: &FallbackConfig, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for service in &fallback.services {
        let id = service.id.as_str();
        let well_formed = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !well_formed {
            errors.push(ValidationError::FallbackId(service.id.clone()));
        }
        if !seen.insert(id) {
            errors.push(ValidationError::DuplicateFallback(service.id.clone()));
        }
    }
}

fn validate_routes(
    routes: &[RouteConfig],
    fallback: &FallbackConfig,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for (index, route) in routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName(index));
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }

        if !route.path_prefix.starts_with('/') {
            errors.push(ValidationError::PathPrefix {
                name: route.name.clone(),
                prefix: route.path_prefix.clone(),
            });
        }

        if let Err(reason) = check_upstream(&route.upstream) {
            errors.push(ValidationError::Upstream {
                name: route.name.clone(),
                upstream: route.upstream.clone(),
                reason,
            });
        }

        if let Some(id) = &route.fallback {
            if !fallback.services.iter().any(|s| &s.id == id) {
                errors.push(ValidationError::UnknownFallback {
                    route: route.name.clone(),
                    fallback: id.clone(),
                });
            }
        }
    }
}

fn check_upstream(upstream: &str) -> Result<(), &'static str> {
    let url = Url::parse(upstream).map_err(|_| "not a URL")?;
    if url.scheme() != "http" {
        return Err("only http upstreams are supported");
    }
    if url.host_str().is_none() {
        return Err("missing host");
    }
    if url.path() != "/" || url.query().is_some() {
        return Err("request paths are forwarded as-is, upstream must not carry a path");
    }
    Ok(())
}

fn validate_timeouts(timeouts: &TimeoutConfig, errors: &mut Vec<ValidationError>) {
    for (field, value) in [
        ("connect_secs", timeouts.connect_secs),
        ("upstream_secs", timeouts.upstream_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FallbackServiceConfig;

    fn route(name: &str, upstream: &str, fallback: Option<&str>) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            path_prefix: "/api".into(),
            upstream: upstream.into(),
            fallback: fallback.map(String::from),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_origin_shapes() {
        assert!(check_origin("http://localhost:3000").is_ok());
        assert!(check_origin("https://app.example.com").is_ok());
        assert!(check_origin("http://localhost:3000/").is_err());
        assert!(check_origin("http://localhost:3000/app").is_err());
        assert!(check_origin("https://*.example.com").is_err());
        assert!(check_origin("localhost:3000").is_err());
        assert!(check_origin("ftp://files.example.com").is_err());
        assert!(check_origin("http://localhost:80").is_err());
        assert!(check_origin("https://app.example.com:443").is_err());
        assert!(check_origin("http://LOCALHOST:3000").is_err());
        assert!(check_origin("http://192.168.1.7:3001").is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.cors.allowed_origins.push("http://localhost:3000".into());
        config.routes.push(route("", "http://127.0.0.1:9000", None));
        config.routes.push(route("students", "https://10.0.0.1", Some("nope")));
        config.timeouts.upstream_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateOrigin(
            "http://localhost:3000".into()
        )));
        assert!(errors.contains(&ValidationError::EmptyRouteName(0)));
        assert!(errors.contains(&ValidationError::UnknownFallback {
            route: "students".into(),
            fallback: "nope".into(),
        }));
        assert!(errors.contains(&ValidationError::ZeroTimeout("upstream_secs")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Upstream { name, .. } if name == "students")));
    }

    #[test]
    fn test_fallback_ids() {
        let mut config = GatewayConfig::default();
        config
            .fallback
            .services
            .push(FallbackServiceConfig::new("Grades", "Grade"));
        config
            .fallback
            .services
            .push(FallbackServiceConfig::new("auth", "Auth"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::FallbackId("Grades".into()),
                ValidationError::DuplicateFallback("auth".into()),
            ]
        );
    }

    #[test]
    fn test_route_with_known_fallback() {
        let mut config = GatewayConfig::default();
        config
            .routes
            .push(route("teachers", "http://127.0.0.1:9003", Some("teachers")));
        assert_eq!(validate_config(&config), Ok(()));
    }
}
