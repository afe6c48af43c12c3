// In app/src/display.rs

use analytics::SignalSummary;
use core_types::SignalRow;

/// Renders the signal table as aligned plain text, optionally only the last `tail` rows.
pub fn render_table(rows: &[SignalRow], tail: Option<usize>) -> String {
    let start = tail.map_or(0, |n| rows.len().saturating_sub(n));
    let mut out = format!("{:<19}  {:<8}  {:<6}  {:>13}\n", "timestamp", "symbol", "signal", "position_size");
    for row in &rows[start..] {
        out.push_str(&format!(
            "{:<19}  {:<8}  {:<6}  {:>13.2}\n",
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.symbol,
            row.signal,
            row.position_size
        ));
    }
    out
}

pub fn render_summary(summary: &SignalSummary) -> String {
    let mut out = format!("rows:            {}\n", summary.rows);
    if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
        out.push_str(&format!("period:          {first} .. {last}\n"));
    }
    out.push_str(&format!(
        "signals:         {} BUY / {} SELL / {} HOLD\n",
        summary.buys, summary.sells, summary.holds
    ));
    out.push_str(&format!(
        "round trips:     {}{}\n",
        summary.round_trips,
        if summary.open_at_end { " (position open at end)" } else { "" }
    ));
    out.push_str(&format!("time in market:  {:.1}%\n", summary.time_in_market * 100.0));
    out
}
