//! Axum router construction for the updater API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::diagnostics;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the updater server.
///
/// The router includes:
/// - `GET /` -- readiness message
/// - `GET /health` -- liveness + server time
/// - `GET /test` -- store diagnostics
/// - `POST /live-update` -- simulate a spreadsheet update
/// - `GET /runs` -- list recorded runs
/// - `GET /runs/{run_id}/rows` -- rows recorded for one run
///
/// CORS admits any origin, method, and header, with credentials -- a
/// demo-deployment policy. `very_permissive` mirrors the request origin,
/// which is the only way tower-http allows combining a wildcard with
/// credentialed requests.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/test", get(diagnostics::test_database))
        .route("/live-update", post(handlers::live_update))
        .route("/runs", get(handlers::list_runs))
        .route("/runs/{run_id}/rows", get(handlers::get_run_rows))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
