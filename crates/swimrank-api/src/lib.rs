//! Updater API server for the `SwimRank` backend.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`POST /live-update`** -- simulate updating a spreadsheet tab with
//!   scraped swim-meet results and best-effort record the run
//! - **`GET /runs`**, **`GET /runs/{run_id}/rows`** -- read back recorded
//!   runs and their simulated rows
//! - **`GET /test`** -- diagnostics for the store connection
//! - **`GET /`** and **`GET /health`** -- liveness
//!
//! # Architecture
//!
//! Handlers read the shared [`AppState`], whose [`Persistence`] field is
//! an explicit enum rather than a nullable store handle: a missing
//! database is a first-class state every endpoint knows how to answer
//! from. Persistence is a best-effort side effect of the live-update
//! call -- the response is built first and returned unchanged whatever
//! the store does.
//!
//! [`AppState`]: state::AppState
//! [`Persistence`]: state::Persistence

pub mod diagnostics;
pub mod error;
pub mod handlers;
pub mod persist;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, Persistence};
