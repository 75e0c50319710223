//! Run and result-row persistence.
//!
//! Every live-update call that reaches a connected store produces one row
//! in `runs` and one row in `results` per simulated update. Both are
//! written in a single transaction and never mutated afterwards. The read
//! side serves the `/runs` listing and the per-run row lookup.

use sqlx::PgPool;
use swimrank_types::{ResultId, RunId, UpdatedRow};
use uuid::Uuid;

use crate::error::DbError;

/// A run about to be recorded, borrowed from the request and response.
#[derive(Debug, Clone, Copy)]
pub struct NewRun<'a> {
    /// Athlete profile URL from the request.
    pub athlete_url: &'a str,
    /// Spreadsheet URL from the request.
    pub sheet_url: &'a str,
    /// Target tab name from the request.
    pub sheet_tab: &'a str,
    /// Whether the simulated update succeeded (always true today).
    pub ok: bool,
    /// Human-readable outcome message.
    pub message: &'a str,
    /// Number of rows the simulation updated.
    pub updated_count: u32,
}

/// Operations on the `runs` and `results` tables.
pub struct RunStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RunStore<'a> {
    /// Create a new run store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record one run and its result rows in a single transaction.
    ///
    /// Result rows are inserted with one multi-row `INSERT` using UNNEST
    /// so the round-trip count stays constant regardless of row count.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if any insert fails; nothing is
    /// committed in that case.
    pub async fn record_run(
        &self,
        run: &NewRun<'_>,
        rows: &[UpdatedRow],
    ) -> Result<RunId, DbError> {
        let run_id = RunId::new();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"INSERT INTO runs (id, athlete_url, sheet_url, sheet_tab, ok, message, updated_count)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(run_id.into_inner())
        .bind(run.athlete_url)
        .bind(run.sheet_url)
        .bind(run.sheet_tab)
        .bind(run.ok)
        .bind(run.message)
        .bind(i32::try_from(run.updated_count).unwrap_or(i32::MAX))
        .execute(&mut *tx)
        .await?;

        if !rows.is_empty() {
            // Pre-allocate arrays for the UNNEST-based batch insert.
            let len = rows.len();
            let mut ids = Vec::with_capacity(len);
            let mut run_ids = Vec::with_capacity(len);
            let mut row_numbers = Vec::with_capacity(len);
            let mut events = Vec::with_capacity(len);
            let mut dates = Vec::with_capacity(len);
            let mut old_times: Vec<Option<String>> = Vec::with_capacity(len);
            let mut new_times = Vec::with_capacity(len);
            let mut deltas: Vec<Option<String>> = Vec::with_capacity(len);

            for row in rows {
                ids.push(ResultId::new().into_inner());
                run_ids.push(run_id.into_inner());
                row_numbers.push(i32::try_from(row.row_number).unwrap_or(i32::MAX));
                events.push(row.event.clone());
                dates.push(row.date.clone());
                old_times.push(row.old_time.clone());
                new_times.push(row.new_time.clone());
                deltas.push(row.delta.clone());
            }

            sqlx::query(
                r"INSERT INTO results (id, run_id, row_number, event, event_date, old_time, new_time, delta)
                  SELECT * FROM UNNEST($1::UUID[], $2::UUID[], $3::INTEGER[], $4::TEXT[], $5::TEXT[], $6::TEXT[], $7::TEXT[], $8::TEXT[])",
            )
            .bind(&ids)
            .bind(&run_ids)
            .bind(&row_numbers)
            .bind(&events)
            .bind(&dates)
            .bind(&old_times)
            .bind(&new_times)
            .bind(&deltas)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(run_id = %run_id, count = rows.len(), "Recorded run");
        Ok(run_id)
    }

    /// Fetch up to `limit` runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_runs(&self, limit: i64) -> Result<Vec<RunRow>, DbError> {
        let rows = sqlx::query_as::<_, RunRow>(
            r"SELECT id, athlete_url, sheet_url, sheet_tab, ok, message, updated_count, created_at
              FROM runs
              ORDER BY created_at DESC
              LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetch all result rows recorded for one run, in spreadsheet order.
    ///
    /// No existence check is performed on `run_id`: an unknown id simply
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn rows_for_run(&self, run_id: Uuid) -> Result<Vec<ResultRow>, DbError> {
        let rows = sqlx::query_as::<_, ResultRow>(
            r"SELECT id, run_id, row_number, event, event_date, old_time, new_time, delta, created_at
              FROM results
              WHERE run_id = $1
              ORDER BY row_number",
        )
        .bind(run_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// A row from the `runs` table.
///
/// Uses runtime types rather than compile-time checked types to avoid
/// requiring a live database during builds.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RunRow {
    /// Run identifier.
    pub id: Uuid,
    /// Athlete profile URL the run targeted.
    pub athlete_url: String,
    /// Spreadsheet URL the run targeted.
    pub sheet_url: String,
    /// Tab name the run targeted.
    pub sheet_tab: String,
    /// Whether the simulated update succeeded.
    pub ok: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Number of rows the simulation updated.
    pub updated_count: i32,
    /// When the run was recorded.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A row from the `results` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResultRow {
    /// Result identifier.
    pub id: Uuid,
    /// The run this result belongs to.
    pub run_id: Uuid,
    /// Spreadsheet row number the update targeted.
    pub row_number: i32,
    /// Event name.
    pub event: String,
    /// Meet date as an ISO `YYYY-MM-DD` string.
    pub event_date: String,
    /// Previous recorded time, if one existed.
    pub old_time: Option<String>,
    /// Newly recorded time.
    pub new_time: String,
    /// Improvement over the old time, e.g. `-0.48s`.
    pub delta: Option<String>,
    /// When the result was recorded.
    pub created_at: chrono::DateTime<chrono::Utc>,
}
