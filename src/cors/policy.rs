//! The gateway's canonical CORS policy.
//!
//! Header values are rendered once from [`CorsConfig`] so the response path
//! only clones pre-validated `HeaderValue`s.

use axum::http::HeaderValue;

use crate::config::{CorsConfig, UnlistedOrigin, ValidationError};
use crate::cors::allow_list::AllowList;

/// Outcome of checking a request's original `Origin` against the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    /// Allow-listed: echo the exact origin.
    Echo(HeaderValue),
    /// Absent or unlisted, permissive mode: `*`.
    Wildcard,
    /// Absent or unlisted, strict mode: no CORS headers.
    Omit,
}

impl OriginDecision {
    /// Value for `Access-Control-Allow-Origin`, if any header set is written.
    pub fn allow_origin(&self) -> Option<HeaderValue> {
        match self {
            OriginDecision::Echo(origin) => Some(origin.clone()),
            OriginDecision::Wildcard => Some(HeaderValue::from_static("*")),
            OriginDecision::Omit => None,
        }
    }

    /// Metric/log label.
    pub fn label(&self) -> &'static str {
        match self {
            OriginDecision::Echo(_) => "echo",
            OriginDecision::Wildcard => "wildcard",
            OriginDecision::Omit => "omit",
        }
    }
}

/// Immutable CORS policy shared by every request.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_list: AllowList,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    allow_credentials: HeaderValue,
    max_age: HeaderValue,
    expose_headers: Option<HeaderValue>,
    unlisted_origin: UnlistedOrigin,
    answer_preflight: bool,
}

impl CorsPolicy {
    /// Render the policy from configuration.
    pub fn from_config(config: &CorsConfig) -> Result<Self, ValidationError> {
        let expose_headers = if config.expose_headers.is_empty() {
            None
        } else {
            Some(join_values("expose_headers", &config.expose_headers)?)
        };

        Ok(Self {
            allow_list: AllowList::new(config.allowed_origins.iter().cloned()),
            allow_methods: join_values("allowed_methods", &config.allowed_methods)?,
            allow_headers: join_values("allowed_headers", &config.allowed_headers)?,
            allow_credentials: HeaderValue::from_static(if config.allow_credentials {
                "true"
            } else {
                "false"
            }),
            max_age: HeaderValue::from(config.max_age_secs),
            expose_headers,
            unlisted_origin: config.unlisted_origin,
            answer_preflight: config.answer_preflight,
        })
    }

    /// Decide the `Access-Control-Allow-Origin` grant for an original origin.
    ///
    /// Origins that are not visible ASCII can never be allow-listed and are
    /// treated like an absent header.
    pub fn decide(&self, origin: Option<&HeaderValue>) -> OriginDecision {
        match origin {
            Some(value)
                if value
                    .to_str()
                    .map(|o| self.allow_list.contains(o))
                    .unwrap_or(false) =>
            {
                OriginDecision::Echo(value.clone())
            }
            _ => match self.unlisted_origin {
                UnlistedOrigin::Wildcard => OriginDecision::Wildcard,
                UnlistedOrigin::Omit => OriginDecision::Omit,
            },
        }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn allow_methods(&self) -> &HeaderValue {
        &self.allow_methods
    }

    pub fn allow_headers(&self) -> &HeaderValue {
        &self.allow_headers
    }

    pub fn allow_credentials(&self) -> &HeaderValue {
        &self.allow_credentials
    }

    pub fn max_age(&self) -> &HeaderValue {
        &self.max_age
    }

    pub fn expose_headers(&self) -> Option<&HeaderValue> {
        self.expose_headers.as_ref()
    }

    pub fn answers_preflight(&self) -> bool {
        self.answer_preflight
    }
}

fn join_values(field: &'static str, values: &[String]) -> Result<HeaderValue, ValidationError> {
    let joined = values.join(",");
    HeaderValue::from_str(&joined).map_err(|_| ValidationError::HeaderToken {
        field,
        value: joined,
    })
}
