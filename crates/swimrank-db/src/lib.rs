//! Data layer (`PostgreSQL`) for the `SwimRank` updater backend.
//!
//! The store is an optional collaborator: the API serves every endpoint
//! without it, degrading to "not configured" responses. When a database
//! URL is configured, each live-update call records one run plus one
//! result row per simulated update, and the read endpoints query that
//! history back.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time
//! checked) to avoid requiring a live database at build time. All queries
//! are parameterized.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration, and migrations
//! - [`run_store`] -- Run and result-row persistence and queries
//! - [`error`] -- Shared error types

pub mod error;
pub mod postgres;
pub mod run_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use run_store::{NewRun, ResultRow, RunRow, RunStore};
