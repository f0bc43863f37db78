//! Degraded-service response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON body returned when a backend family is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPayload {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
}

impl FallbackPayload {
    /// Build a fresh payload for `display_name`, stamped with the current time.
    pub fn unavailable(display_name: &str) -> Self {
        Self {
            error: "Service Unavailable".to_string(),
            message: format!("{display_name} service is temporarily unavailable"),
            timestamp: Utc::now(),
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
        }
    }
}

impl IntoResponse for FallbackPayload {
    fn into_response(self) -> Response {
        // Json answers 500 on its own if serialization ever fails.
        (StatusCode::SERVICE_UNAVAILABLE, Json(self)).into_response()
    }
}
