//! Shared application state for the updater API server.
//!
//! [`AppState`] is built once by the backend binary, wrapped in
//! [`std::sync::Arc`], and injected into handlers via Axum's `State`
//! extractor. It carries no request-scoped mutability: the only shared
//! resource is the database pool inside [`Persistence`], whose lifecycle
//! belongs to the binary.

use swimrank_db::PostgresPool;

/// The persistence collaborator, made explicit.
///
/// Replaces a nullable module-global store handle: handlers match on
/// this enum, so "no database" is a state every endpoint answers from
/// rather than an error path.
#[derive(Debug, Clone)]
pub enum Persistence {
    /// No database URL was configured (or the connection failed at
    /// startup). Writes are skipped; reads answer "not configured".
    Unconfigured,
    /// A connected `PostgreSQL` pool.
    Connected(PostgresPool),
}

impl Persistence {
    /// Return the connected pool, if any.
    pub const fn pool(&self) -> Option<&PostgresPool> {
        match self {
            Self::Unconfigured => None,
            Self::Connected(pool) => Some(pool),
        }
    }
}

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The persistence collaborator.
    pub persistence: Persistence,
}

impl AppState {
    /// Create application state around a persistence collaborator.
    pub const fn new(persistence: Persistence) -> Self {
        Self { persistence }
    }

    /// Create application state with no store attached.
    pub const fn unconfigured() -> Self {
        Self {
            persistence: Persistence::Unconfigured,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::unconfigured()
    }
}
