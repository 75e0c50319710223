//! Simulated result-row generator for the `SwimRank` updater backend.
//!
//! There is no real scraping and no real spreadsheet mutation anywhere in
//! this workspace: the live-update endpoint calls into this crate to
//! fabricate a small, plausible-looking set of updated rows instead. If the
//! system is ever productionized, this entire crate is the part that gets
//! replaced by real integrations.
//!
//! # Modules
//!
//! - [`catalog`] -- The fixed event catalog the generator samples from
//! - [`times`] -- Swim-time and delta string formatting
//! - [`generator`] -- Row fabrication from a caller-supplied RNG

pub mod catalog;
pub mod generator;
pub mod times;

// Re-export primary items for convenience.
pub use catalog::EVENT_CATALOG;
pub use generator::simulate_updated_rows;
pub use times::{format_delta, format_swim_time};
