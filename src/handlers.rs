use crate::{
    AppState,
    error::GateError,
    models::{NavigationDecision, NavigationIntent, RouteEntry},
    session::SessionSnapshot,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GateError Response Mapping
///
/// Construction-time variants never outlive startup and fall into the 500 arm.
impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = match &self {
            GateError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            GateError::SessionUnavailable(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

// --- Handlers ---

/// list_routes
///
/// Returns the full route table in registration order, so the SPA can build its router from
/// the same source the gate decides on.
#[utoipa::path(
    get,
    path = "/routes",
    responses((status = 200, description = "Route table", body = [RouteEntry]))
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteEntry>> {
    Json(state.gate.table().entries().cloned().collect())
}

/// get_route
///
/// Looks a single route up by its symbolic name.
#[utoipa::path(
    get,
    path = "/routes/{name}",
    params(("name" = String, Path, description = "Symbolic route name, e.g. `AdminPanel`")),
    responses(
        (status = 200, description = "Route", body = RouteEntry),
        (status = 404, description = "No route with that name")
    )
)]
pub async fn get_route(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RouteEntry>, StatusCode> {
    state
        .gate
        .table()
        .by_name(&name)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// navigate
///
/// Decides a navigation for the session carried on the request
/// (`Authorization: Bearer <token>`, `X-User-Role`). The `SessionSnapshot` extractor reads
/// those headers afresh for every request and fails closed.
///
/// *Note*: Unknown targets are not an error here. The decision comes back with `found=false`
/// and the SPA renders its own not-found view.
#[utoipa::path(
    get,
    path = "/navigate",
    params(NavigationIntent),
    responses(
        (status = 200, description = "Navigation decision", body = NavigationDecision),
        (status = 500, description = "Redirects did not settle")
    )
)]
pub async fn navigate(
    State(state): State<AppState>,
    session: SessionSnapshot,
    Query(intent): Query<NavigationIntent>,
) -> Result<Json<NavigationDecision>, GateError> {
    let decision = state
        .gate
        .apply(&intent, &session)
        .inspect_err(|err| tracing::error!(error = %err, to = %intent.to, "navigation failed"))?;
    Ok(Json(decision))
}
