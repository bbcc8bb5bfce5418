use axum::{
    Router,
    extract::FromRef,
    http::{HeaderName, HeaderValue},
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation core: route table, guard, session snapshots and the navigator applying them.
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod navigator;
pub mod session;

// Route table, split by access tier (Public, Authenticated, Admin).
pub mod routes;

// HTTP host exposing the gate to the SPA.
pub mod handlers;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{GateError, SessionError};
pub use guard::{GuardPolicy, GuardState, NavigationGuard, Verdict};
pub use navigator::NavigationGate;
pub use routes::{RouteMatch, RouteTable};
pub use session::{SessionSnapshot, SessionStore};

/// ApiDoc
///
/// OpenAPI document for the gate host, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes, handlers::get_route, handlers::navigate),
    components(
        schemas(
            models::RouteEntry, models::ViewRef, models::AccessRequirement,
            models::NavigationOutcome, models::DenialNotice, models::NavigationDecision,
        )
    ),
    tags(
        (name = "library-gate", description = "Library navigation gate")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state of the gate host. The gate is built once at startup; the session is
/// never part of the state and is read from each request instead.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<NavigationGate>,
    pub config: AppConfig,
}

impl AppState {
    /// Builds the state for the library application's fixed route table.
    pub fn new(config: AppConfig) -> Result<Self, GateError> {
        let gate = NavigationGate::from_config(&config)?;
        Ok(Self {
            gate: Arc::new(gate),
            config,
        })
    }
}

impl FromRef<AppState> for Arc<NavigationGate> {
    fn from_ref(app_state: &AppState) -> Arc<NavigationGate> {
        app_state.gate.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the host's routes, middleware and state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = cors_layer(&state.config);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "ok" }))
        // Route table, read-only.
        .route("/routes", get(handlers::list_routes))
        .route("/routes/{name}", get(handlers::get_route))
        // Guard decisions. The session comes from each request's headers, never from the state.
        .route("/navigate", get(handlers::navigate))
        .with_state(state);

    // 3. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: one span per request, carrying the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: echoes x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer (applied last)
        .layer(cors)
}

/// cors_layer
///
/// Any origin in local development; only the configured SPA origin otherwise.
/// An origin that is not a valid header value allows nothing.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match &config.allowed_origin {
        None => cors.allow_origin(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(origin) => cors.allow_origin(origin),
            Err(_) => {
                tracing::warn!(%origin, "GATE_ALLOWED_ORIGIN is not a valid header value, CORS disabled");
                cors
            }
        },
    }
}

/// trace_span_logger
///
/// Span for every request, correlated by the `x-request-id` header.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
