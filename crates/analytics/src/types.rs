// In crates/analytics/src/types.rs

use chrono::NaiveDateTime;
use serde::Serialize;

/// Headline numbers for one signal table, shown next to the table itself.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct SignalSummary {
    pub rows: usize,
    pub buys: usize,
    pub sells: usize,
    pub holds: usize,
    /// BUYs that were later closed by a SELL.
    pub round_trips: usize,
    /// True if the last row leaves a position open.
    pub open_at_end: bool,
    /// Share of rows with a non-zero allocation, in `[0, 1]`.
    pub time_in_market: f64,
    pub average_position_size: f64,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
}
