//! REST API endpoint handlers for the updater server.
//!
//! All handlers read the shared [`AppState`]. The live-update handler is
//! the only writer, and even that write is best-effort (see
//! [`crate::persist`]).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Readiness message |
//! | `GET` | `/health` | Liveness + server time |
//! | `POST` | `/live-update` | Simulate a spreadsheet update |
//! | `GET` | `/runs` | List recorded runs (`?limit=N`, default 10) |
//! | `GET` | `/runs/{run_id}/rows` | Rows recorded for one run |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use swimrank_db::{ResultRow, RunRow, RunStore};
use swimrank_sim::simulate_updated_rows;
use swimrank_types::UpdatedRow;
use url::Url;
use uuid::Uuid;

use crate::error::ApiError;
use crate::persist;
use crate::state::AppState;

/// Default number of runs returned by the listing endpoint.
const DEFAULT_RUNS_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /live-update`.
#[derive(Debug, serde::Deserialize)]
pub struct LiveUpdateRequest {
    /// Swimrankings athlete profile URL.
    pub athlete_url: String,
    /// Google Sheets document URL.
    pub sheet_url: String,
    /// Target sheet tab name.
    pub sheet_tab: String,
}

/// Response body for `POST /live-update`.
#[derive(Debug, serde::Serialize)]
pub struct LiveUpdateResponse {
    /// Whether the simulated update succeeded.
    pub ok: bool,
    /// Localized outcome message naming the tab.
    pub message: String,
    /// Number of updated rows; always equals `rows.len()`.
    pub updated_count: u32,
    /// The simulated row updates.
    pub rows: Vec<UpdatedRow>,
}

/// Query parameters for the `GET /runs` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct RunsQuery {
    /// Maximum number of runs to return (default 10).
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// GET / -- readiness message
// ---------------------------------------------------------------------------

/// Report that the backend is up.
#[allow(clippy::unused_async)] // axum handlers must return a future
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "SwimRank Updater backend ready",
    }))
}

// ---------------------------------------------------------------------------
// GET /health -- liveness
// ---------------------------------------------------------------------------

/// Liveness probe with the current server time.
#[allow(clippy::unused_async)] // axum handlers must return a future
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
    }))
}

// ---------------------------------------------------------------------------
// POST /live-update -- simulate a spreadsheet update
// ---------------------------------------------------------------------------

/// Simulate scraping the athlete page and updating the named sheet tab.
///
/// Validates the request, fabricates 1-3 updated rows, then attempts to
/// record the run. The recording attempt never changes the response.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] (HTTP 400) when the tab name is
/// blank or either URL does not parse.
pub async fn live_update(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LiveUpdateRequest>,
) -> Result<Json<LiveUpdateResponse>, ApiError> {
    validate_request(&payload)?;

    // ThreadRng is not Send; keep it scoped before the await below.
    let rows = {
        let mut rng = rand::rng();
        simulate_updated_rows(&mut rng)
    };

    let updated_count = u32::try_from(rows.len()).unwrap_or(u32::MAX);
    let message = format!(
        "{} ligne(s) mise(s) à jour dans l'onglet '{}'.",
        rows.len(),
        payload.sheet_tab
    );

    let response = LiveUpdateResponse {
        ok: true,
        message,
        updated_count,
        rows,
    };

    persist::record_run(&state.persistence, &payload, &response)
        .await
        .log();

    Ok(Json(response))
}

/// Reject a request whose tab name is blank or whose URLs do not parse.
///
/// URLs are checked syntactically only; nothing is probed for
/// reachability. No other validation is performed.
fn validate_request(payload: &LiveUpdateRequest) -> Result<(), ApiError> {
    if payload.sheet_tab.trim().is_empty() {
        return Err(ApiError::Validation(String::from(
            "Le nom d'onglet est requis",
        )));
    }

    for (field, value) in [
        ("athlete_url", &payload.athlete_url),
        ("sheet_url", &payload.sheet_url),
    ] {
        if Url::parse(value).is_err() {
            return Err(ApiError::Validation(format!(
                "{field} must be a valid URL"
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// GET /runs -- list recorded runs
// ---------------------------------------------------------------------------

/// List recorded runs, newest first.
///
/// Store failures and the unconfigured state both degrade to an
/// `ok: false` body with an empty list -- this endpoint never raises.
pub async fn list_runs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RunsQuery>,
) -> Json<serde_json::Value> {
    let limit = params.limit.unwrap_or(DEFAULT_RUNS_LIMIT).max(0);

    let Some(pool) = state.persistence.pool() else {
        return Json(serde_json::json!({
            "ok": false,
            "message": "database not configured",
            "runs": [],
        }));
    };

    match RunStore::new(pool.pool()).list_runs(limit).await {
        Ok(runs) => {
            let runs: Vec<serde_json::Value> = runs.iter().map(run_to_json).collect();
            Json(serde_json::json!({ "ok": true, "runs": runs }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Run listing failed");
            Json(serde_json::json!({
                "ok": false,
                "message": format!("{e}"),
                "runs": [],
            }))
        }
    }
}

// ---------------------------------------------------------------------------
// GET /runs/{run_id}/rows -- rows recorded for one run
// ---------------------------------------------------------------------------

/// Return all result rows recorded for one run.
///
/// No existence check is performed on `run_id`: an unknown id yields
/// `ok: true` with an empty list. Store failures degrade to `ok: false`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidUuid`] (HTTP 400) when the path segment is
/// not a UUID.
pub async fn get_run_rows(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let run_id = parse_uuid(&run_id)?;

    let Some(pool) = state.persistence.pool() else {
        return Ok(Json(serde_json::json!({
            "ok": false,
            "message": "database not configured",
            "rows": [],
        })));
    };

    match RunStore::new(pool.pool()).rows_for_run(run_id).await {
        Ok(rows) => {
            let rows: Vec<serde_json::Value> = rows.iter().map(result_to_json).collect();
            Ok(Json(serde_json::json!({ "ok": true, "rows": rows })))
        }
        Err(e) => {
            tracing::warn!(error = %e, run_id = %run_id, "Row lookup failed");
            Ok(Json(serde_json::json!({
                "ok": false,
                "message": format!("{e}"),
                "rows": [],
            })))
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reshape a stored run for transport, with the id as a plain string.
fn run_to_json(run: &RunRow) -> serde_json::Value {
    serde_json::json!({
        "id": run.id.to_string(),
        "athlete_url": run.athlete_url,
        "sheet_url": run.sheet_url,
        "sheet_tab": run.sheet_tab,
        "ok": run.ok,
        "message": run.message,
        "updated_count": run.updated_count,
        "created_at": run.created_at.to_rfc3339(),
    })
}

/// Reshape a stored result row for transport.
fn result_to_json(row: &ResultRow) -> serde_json::Value {
    serde_json::json!({
        "id": row.id.to_string(),
        "run_id": row.run_id.to_string(),
        "row_number": row.row_number,
        "event": row.event,
        "date": row.event_date,
        "old_time": row.old_time,
        "new_time": row.new_time,
        "delta": row.delta,
        "created_at": row.created_at.to_rfc3339(),
    })
}

/// Parse a UUID from a string, returning an [`ApiError`] on failure.
fn parse_uuid(s: &str) -> Result<Uuid, ApiError> {
    s.parse::<Uuid>()
        .map_err(|e| ApiError::InvalidUuid(format!("{s}: {e}")))
}
