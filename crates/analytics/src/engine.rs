use core_types::{Signal, SignalRow};

use crate::types::SignalSummary;

/// Computes summaries over a finished signal table.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summarize(&self, rows: &[SignalRow]) -> SignalSummary {
        let mut summary = SignalSummary {
            rows: rows.len(),
            first_timestamp: rows.first().map(|r| r.timestamp),
            last_timestamp: rows.last().map(|r| r.timestamp),
            ..Default::default()
        };
        if rows.is_empty() {
            return summary;
        }

        let mut open = false;
        let mut exposed_rows = 0usize;
        let mut total_size = 0.0;
        for row in rows {
            match row.signal {
                Signal::Buy => {
                    summary.buys += 1;
                    open = true;
                }
                Signal::Sell => {
                    summary.sells += 1;
                    if open {
                        summary.round_trips += 1;
                    }
                    open = false;
                }
                Signal::Hold => summary.holds += 1,
            }
            if row.position_size > 0.0 {
                exposed_rows += 1;
            }
            total_size += row.position_size;
        }

        summary.open_at_end = open;
        summary.time_in_market = exposed_rows as f64 / rows.len() as f64;
        summary.average_position_size = total_size / rows.len() as f64;
        summary
    }
}
