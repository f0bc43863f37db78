//! Forwarding failures and their client-facing responses.
//!
//! # Design Decisions
//! - Routes with a configured fallback never surface these; the fallback
//!   responder answers instead
//! - Upstream connection errors map to 502, deadline misses to 504

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("no route matches path '{0}'")]
    NoRoute(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not answer within {0} seconds")]
    Timeout(u64),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::NoRoute(_) => StatusCode::NOT_FOUND,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match &self {
            ProxyError::NoRoute(_) => "No matching route found",
            ProxyError::Upstream(_) => "Upstream request failed",
            ProxyError::Timeout(_) => "Upstream request timed out",
        };
        (self.status(), body).into_response()
    }
}
