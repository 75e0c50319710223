//! The updated-row record produced by the simulator and served over HTTP.

use serde::{Deserialize, Serialize};

/// One simulated spreadsheet row update.
///
/// Built fresh for every live-update request and immutable once built.
/// Swim times are rendered as `M:SS.mmm`; the delta is a signed seconds
/// string such as `-0.48s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedRow {
    /// Spreadsheet row number the update targets.
    pub row_number: u32,
    /// Event name, drawn from the fixed event catalog.
    pub event: String,
    /// Meet date as an ISO `YYYY-MM-DD` string.
    pub date: String,
    /// Previous recorded time, if one existed.
    pub old_time: Option<String>,
    /// Newly recorded time.
    pub new_time: String,
    /// Improvement over the old time, e.g. `-0.48s`.
    pub delta: Option<String>,
}
