//! Error types for the backend binary.
//!
//! [`BackendError`] is the top-level error type that wraps the failure
//! modes a startup can actually die from. Note what is absent: database
//! errors. A missing or broken store degrades the API, it never aborts
//! the process.

/// Top-level error for the backend binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The HTTP server failed to bind or crashed while serving.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: swimrank_api::ServerError,
    },
}
