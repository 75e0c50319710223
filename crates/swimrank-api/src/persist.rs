//! Best-effort persistence of live-update runs.
//!
//! Recording a run is a side effect of the live-update call, not part of
//! its response contract: the handler builds the response first, then
//! hands it here, and returns it unchanged whatever happens below. The
//! explicit [`PersistOutcome`] keeps "not configured" distinguishable
//! from "store rejected the write" in the logs, where a swallow-all
//! handler would have erased the difference.

use swimrank_db::{DbError, NewRun, RunStore};
use swimrank_types::RunId;

use crate::handlers::{LiveUpdateRequest, LiveUpdateResponse};
use crate::state::Persistence;

/// What became of one attempt to record a run.
#[derive(Debug)]
pub enum PersistOutcome {
    /// The run and its result rows were written.
    Saved {
        /// Identifier assigned to the stored run.
        run_id: RunId,
    },
    /// No store is configured; nothing was attempted.
    NotConfigured,
    /// The store rejected the write; the response is unaffected.
    Failed(DbError),
}

impl PersistOutcome {
    /// Log the outcome at the level it deserves.
    pub fn log(&self) {
        match self {
            Self::Saved { run_id } => {
                tracing::debug!(run_id = %run_id, "Run recorded");
            }
            Self::NotConfigured => {
                tracing::debug!("No store configured, run not recorded");
            }
            Self::Failed(e) => {
                tracing::warn!(error = %e, "Failed to record run");
            }
        }
    }
}

/// Attempt to record one run and its simulated rows.
///
/// Never fails the caller: every outcome, including a store error, is
/// folded into [`PersistOutcome`].
pub async fn record_run(
    persistence: &Persistence,
    request: &LiveUpdateRequest,
    response: &LiveUpdateResponse,
) -> PersistOutcome {
    let Some(pool) = persistence.pool() else {
        return PersistOutcome::NotConfigured;
    };

    let new_run = NewRun {
        athlete_url: &request.athlete_url,
        sheet_url: &request.sheet_url,
        sheet_tab: &request.sheet_tab,
        ok: response.ok,
        message: &response.message,
        updated_count: response.updated_count,
    };

    match RunStore::new(pool.pool())
        .record_run(&new_run, &response.rows)
        .await
    {
        Ok(run_id) => PersistOutcome::Saved { run_id },
        Err(e) => PersistOutcome::Failed(e),
    }
}
