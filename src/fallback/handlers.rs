use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::config::FallbackConfig;
use crate::fallback::payload::FallbackPayload;
use crate::observability::metrics;

/// Backend families with a degraded-service message, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct FallbackRegistry {
    services: Vec<(String, String)>,
}

impl FallbackRegistry {
    pub fn from_config(config: &FallbackConfig) -> Self {
        Self {
            services: config
                .services
                .iter()
                .map(|s| (s.id.clone(), s.display_name.clone()))
                .collect(),
        }
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.services
            .iter()
            .find(|(service_id, _)| service_id == id)
            .map(|(_, name)| name.as_str())
    }

    /// The 503 response for `id`, or `None` if the family is unknown.
    pub fn respond(&self, id: &str) -> Option<Response> {
        let display_name = self.display_name(id)?;
        metrics::record_fallback(id);
        tracing::warn!(service = %id, "Serving fallback response");
        Some(FallbackPayload::unavailable(display_name).into_response())
    }
}

pub async fn fallback_handler(
    State(registry): State<Arc<FallbackRegistry>>,
    Path(service): Path<String>,
) -> Response {
    match registry.respond(&service) {
        Some(response) => response,
        None => (StatusCode::NOT_FOUND, "Unknown fallback service").into_response(),
    }
}
