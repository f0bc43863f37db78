//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler and fallback routes
//! - Wire up middleware (request ID, tracing, CORS filter chain, timeout)
//! - Bind server to listener
//! - Forward requests to upstream services
//! - Hand unreachable upstreams to the fallback responder

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, Version},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, ValidationError};
use crate::cors::{cors_filter_middleware, CorsFilterState, CorsPolicy, RequestContext};
use crate::fallback::{setup_fallback_router, FallbackRegistry};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::ProxyError;
use crate::observability::metrics::RouteLabel;
use crate::routing::{Route, Router as RouteTable};

/// Application state injected into the forwarding handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub fallbacks: Arc<FallbackRegistry>,
    pub client: Client<HttpConnector, Body>,
    pub upstream_timeout_secs: u64,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Build the gateway from a validated configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ValidationError> {
        let policy = Arc::new(CorsPolicy::from_config(&config.cors)?);
        let routes = Arc::new(RouteTable::from_config(&config.routes)?);
        let fallbacks = Arc::new(FallbackRegistry::from_config(&config.fallback));

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        tracing::info!(
            allowed_origins = policy.allow_list().len(),
            routes = routes.len(),
            "Gateway initialized"
        );

        let cors = CorsFilterState::new(policy);
        tracing::debug!(filters = ?cors.chain.names(), "Filter chain assembled");

        let state = AppState {
            routes,
            fallbacks: fallbacks.clone(),
            client,
            upstream_timeout_secs: config.timeouts.upstream_secs,
        };

        let router = Self::build_router(&config, state, fallbacks, cors);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The CORS middleware wraps both the forwarding handler and the
    /// fallback routes, so every response leaves with the gateway's set.
    #[allow(deprecated)]
    fn build_router(
        config: &GatewayConfig,
        state: AppState,
        fallbacks: Arc<FallbackRegistry>,
        cors: CorsFilterState,
    ) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .merge(setup_fallback_router(fallbacks))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(middleware::from_fn_with_state(cors, cors_filter_middleware))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving the gateway without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Main gateway handler.
/// Looks up the route, forwards the request, falls back when the upstream is unreachable.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let Some(route) = state.routes.match_path(&path) else {
        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
        let mut response = ProxyError::NoRoute(path).into_response();
        response
            .extensions_mut()
            .insert(RouteLabel("none".to_string()));
        return response;
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = %route.name,
        "Forwarding request"
    );

    let mut response = match forward(&state, route, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                route = %route.name,
                error = %e,
                "Upstream unavailable"
            );
            match route
                .fallback
                .as_deref()
                .and_then(|id| state.fallbacks.respond(id))
            {
                Some(fallback) => fallback,
                None => e.into_response(),
            }
        }
    };

    response
        .extensions_mut()
        .insert(RouteLabel(route.name.clone()));
    response
}

/// Send `request` to the route's upstream.
async fn forward(
    state: &AppState,
    route: &Route,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let (mut parts, body) = request.into_parts();
    parts.uri = route.upstream_uri(&parts.uri);
    // The pooled upstream connections speak HTTP/1.1; Host follows the new URI.
    parts.version = Version::HTTP_11;
    parts.headers.remove(header::HOST);

    let deadline = Duration::from_secs(state.upstream_timeout_secs);
    let response = tokio::time::timeout(
        deadline,
        state.client.request(Request::from_parts(parts, body)),
    )
    .await
    .map_err(|_| ProxyError::Timeout(state.upstream_timeout_secs))??;

    let (parts, body) = response.into_parts();
    Ok(Response::from_parts(parts, Body::new(body)))
}
