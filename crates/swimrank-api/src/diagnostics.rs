//! Diagnostics endpoint reporting backend and store health.
//!
//! `GET /test` answers in one fixed shape whatever the store is doing:
//! import/connect/listing failures all degrade to descriptive status
//! strings. The endpoint itself never errors.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::state::{AppState, Persistence};

/// Maximum number of table names the diagnostics endpoint lists.
const MAX_LISTED_TABLES: i64 = 10;

/// Report backend liveness, store configuration, and reachable tables.
///
/// Environment variables are presence-checked only, never validated:
/// the point of this endpoint is to show an operator what the process
/// can see, not to judge it.
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let database_url_set = std::env::var("DATABASE_URL").is_ok();
    let database_name_set = std::env::var("DATABASE_NAME").is_ok();

    let (database, connection_status, tables) = match &state.persistence {
        Persistence::Unconfigured => (
            String::from("not configured"),
            String::from("not connected"),
            Vec::new(),
        ),
        Persistence::Connected(pool) => match pool.list_tables(MAX_LISTED_TABLES).await {
            Ok(tables) => (
                String::from("connected"),
                String::from("connected"),
                tables,
            ),
            Err(e) => (
                format!("connected but error: {e}"),
                String::from("connected"),
                Vec::new(),
            ),
        },
    };

    Json(serde_json::json!({
        "backend": "running",
        "database": database,
        "connection_status": connection_status,
        "database_url_set": database_url_set,
        "database_name_set": database_name_set,
        "tables": tables,
    }))
}
