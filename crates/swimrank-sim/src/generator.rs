//! Row fabrication for the live-update simulation.
//!
//! The generator samples 1-3 distinct events from the catalog, invents an
//! "old" time and an improvement for each, and packages the result as
//! [`UpdatedRow`] values ready to serve. Generation cannot fail: every
//! range below is non-empty and the sample count never exceeds the
//! catalog size.
//!
//! Callers supply the RNG so tests can drive the generator with a seeded
//! [`rand::rngs::SmallRng`] while production code uses [`rand::rng`].

use chrono::Utc;
use rand::Rng;
use swimrank_types::UpdatedRow;

use crate::catalog::EVENT_CATALOG;
use crate::times::{format_delta, format_swim_time};

/// Minimum number of rows per simulated update.
const MIN_UPDATED_ROWS: usize = 1;

/// Maximum number of rows per simulated update.
const MAX_UPDATED_ROWS: usize = 3;

/// Lowest spreadsheet row a run can start at.
const BASE_ROW_MIN: u32 = 4;

/// Highest spreadsheet row a run can start at.
const BASE_ROW_MAX: u32 = 18;

/// Slowest fabricated "old" time, in milliseconds.
const OLD_TIME_MS_MIN: u32 = 30_000;

/// Fastest fabricated "old" time, in milliseconds.
const OLD_TIME_MS_MAX: u32 = 80_000;

/// Smallest fabricated improvement, in milliseconds.
const GAIN_MS_MIN: u32 = 200;

/// Largest fabricated improvement, in milliseconds.
const GAIN_MS_MAX: u32 = 1_500;

/// Fabricate a plausible set of updated result rows.
///
/// Guarantees, by construction:
/// - between [`MIN_UPDATED_ROWS`] and [`MAX_UPDATED_ROWS`] rows,
/// - event names distinct and drawn only from [`EVENT_CATALOG`],
/// - row numbers strictly increasing,
/// - every `new_time` strictly faster than its `old_time`.
pub fn simulate_updated_rows<R: Rng>(rng: &mut R) -> Vec<UpdatedRow> {
    let count = rng.random_range(MIN_UPDATED_ROWS..=MAX_UPDATED_ROWS);
    let events = sample_events(rng, count);
    let base_row = rng.random_range(BASE_ROW_MIN..=BASE_ROW_MAX);
    let date = Utc::now().format("%Y-%m-%d").to_string();

    let mut rows = Vec::with_capacity(events.len());
    for (idx, event) in events.into_iter().enumerate() {
        let old_ms = rng.random_range(OLD_TIME_MS_MIN..=OLD_TIME_MS_MAX);
        let gain_ms = rng.random_range(GAIN_MS_MIN..=GAIN_MS_MAX);
        let new_ms = old_ms.saturating_sub(gain_ms);

        let offset = u32::try_from(idx).unwrap_or(u32::MAX);
        rows.push(UpdatedRow {
            row_number: base_row.saturating_add(offset),
            event: String::from(event),
            date: date.clone(),
            old_time: Some(format_swim_time(old_ms)),
            new_time: format_swim_time(new_ms),
            delta: Some(format_delta(gain_ms)),
        });
    }

    rows
}

/// Sample `count` distinct event names from the catalog.
///
/// Partial Fisher-Yates shuffle: only the first `count` slots are
/// shuffled into place, the tail of the pool is never touched.
fn sample_events<R: Rng>(rng: &mut R, count: usize) -> Vec<&'static str> {
    let mut pool: Vec<&'static str> = EVENT_CATALOG.to_vec();
    let take = count.min(pool.len());
    for i in 0..take {
        let j = rng.random_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}
