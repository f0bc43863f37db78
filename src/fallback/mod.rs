//! Fallback responder for unavailable backends.
//!
//! Invoked by the forwarding layer when an upstream cannot be reached, and
//! mounted at `GET /fallback/{service}` like the other gateway-owned routes.
//! Every invocation builds a fresh [`FallbackPayload`]; nothing is stored.

pub mod handlers;
pub mod payload;

use std::sync::Arc;

use axum::{routing::get, Router};

pub use self::handlers::{fallback_handler, FallbackRegistry};
pub use self::payload::FallbackPayload;

pub fn setup_fallback_router(registry: Arc<FallbackRegistry>) -> Router {
    Router::new()
        .route("/fallback/{service}", get(fallback_handler))
        .with_state(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        setup_fallback_router(Arc::new(FallbackRegistry::from_config(
            &FallbackConfig::default(),
        )))
    }

    #[tokio::test]
    async fn test_students_fallback() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/fallback/students")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let payload: FallbackPayload = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error, "Service Unavailable");
        assert_eq!(payload.message, "Student service is temporarily unavailable");
        assert_eq!(payload.status, 503);
    }

    #[tokio::test]
    async fn test_unknown_service() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/fallback/grades")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
