//! Integration tests for the updater API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection or database: everything
//! here runs against an unconfigured store, which is itself a state the
//! API must serve correctly.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use swimrank_api::router::build_router;
use swimrank_api::state::AppState;
use swimrank_sim::EVENT_CATALOG;
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    Arc::new(AppState::unconfigured())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn live_update_request(body: &Value) -> Request<Body> {
    Request::post("/live-update")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn valid_payload() -> Value {
    json!({
        "athlete_url": "https://example.com/a",
        "sheet_url": "https://example.com/s",
        "sheet_tab": "Meet2024",
    })
}

/// Parse an `M:SS.mmm` string back into milliseconds.
fn parse_swim_time(s: &str) -> u32 {
    let (minutes, rest) = s.split_once(':').unwrap();
    let (seconds, millis) = rest.split_once('.').unwrap();
    minutes.parse::<u32>().unwrap() * 60_000
        + seconds.parse::<u32>().unwrap() * 1_000
        + millis.parse::<u32>().unwrap()
}

/// Check a delta string against the `-X.XXs` shape.
fn assert_delta_shape(delta: &str) {
    let inner = delta
        .strip_prefix('-')
        .and_then(|d| d.strip_suffix('s'))
        .unwrap();
    let (secs, hundredths) = inner.split_once('.').unwrap();
    assert!(secs.parse::<u32>().is_ok(), "bad delta {delta}");
    assert_eq!(hundredths.len(), 2, "bad delta {delta}");
    assert!(hundredths.parse::<u32>().is_ok(), "bad delta {delta}");
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_reports_ready() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "SwimRank Updater backend ready");
}

#[tokio::test]
async fn test_health_reports_ok_with_time() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert!(json["time"].is_string());
}

#[tokio::test]
async fn test_live_update_returns_simulated_rows() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(live_update_request(&valid_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["ok"], true);
    let count = json["updated_count"].as_u64().unwrap();
    assert!((1..=3).contains(&count));
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), usize::try_from(count).unwrap());
    assert!(
        json["message"].as_str().unwrap().contains("Meet2024"),
        "message should name the tab"
    );
}

#[tokio::test]
async fn test_live_update_rows_are_well_formed() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(live_update_request(&valid_payload()))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    let rows = json["rows"].as_array().unwrap();

    let mut events: Vec<&str> = Vec::new();
    let mut previous_row = 0_u64;
    for row in rows {
        let event = row["event"].as_str().unwrap();
        assert!(EVENT_CATALOG.contains(&event), "unknown event {event}");
        events.push(event);

        let row_number = row["row_number"].as_u64().unwrap();
        assert!(row_number > previous_row, "row numbers must increase");
        previous_row = row_number;

        let old = parse_swim_time(row["old_time"].as_str().unwrap());
        let new = parse_swim_time(row["new_time"].as_str().unwrap());
        assert!(new < old, "expected {new} < {old}");

        assert_delta_shape(row["delta"].as_str().unwrap());
    }

    events.sort_unstable();
    events.dedup();
    assert_eq!(events.len(), rows.len(), "events must be distinct");
}

#[tokio::test]
async fn test_live_update_rejects_blank_tab() {
    for tab in ["", "   ", "\t"] {
        let router = build_router(make_test_state());
        let payload = json!({
            "athlete_url": "https://example.com/a",
            "sheet_url": "https://example.com/s",
            "sheet_tab": tab,
        });

        let response = router.oneshot(live_update_request(&payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["error"], "Le nom d'onglet est requis");
        assert!(json.get("rows").is_none());
    }
}

#[tokio::test]
async fn test_live_update_rejects_unparseable_url() {
    let router = build_router(make_test_state());
    let payload = json!({
        "athlete_url": "not a url at all",
        "sheet_url": "https://example.com/s",
        "sheet_tab": "Meet2024",
    });

    let response = router.oneshot(live_update_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_runs_without_store_is_ok_false() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/runs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["runs"], json!([]));
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_runs_accepts_limit_parameter() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/runs?limit=3").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Unconfigured store still answers the shape; the limit only matters
    // once a database is attached.
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ok"], false);
}

#[tokio::test]
async fn test_run_rows_without_store_is_ok_false() {
    let router = build_router(make_test_state());

    let id = uuid::Uuid::now_v7();
    let path = format!("/runs/{id}/rows");
    let response = router
        .oneshot(Request::get(&path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["rows"], json!([]));
}

#[tokio::test]
async fn test_run_rows_invalid_uuid_is_rejected() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(
            Request::get("/runs/not-a-uuid/rows")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_diagnostics_shape_without_store() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["backend"], "running");
    assert_eq!(json["database"], "not configured");
    assert_eq!(json["connection_status"], "not connected");
    assert!(json["database_url_set"].is_boolean());
    assert!(json["database_name_set"].is_boolean());
    assert_eq!(json["tables"], json!([]));
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
