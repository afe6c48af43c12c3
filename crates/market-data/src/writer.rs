// In crates/market-data/src/writer.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;

use core_types::SignalRow;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};

pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The on-disk layout of one signal: `timestamp,symbol,signal,position_size`.
#[derive(Serialize)]
struct SignalRecord<'a> {
    timestamp: String,
    symbol: &'a str,
    signal: &'static str,
    position_size: f64,
}

impl<'a> From<&'a SignalRow> for SignalRecord<'a> {
    fn from(row: &'a SignalRow) -> Self {
        Self {
            timestamp: row.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string(),
            symbol: row.symbol.as_str(),
            signal: row.signal.as_str(),
            position_size: row.position_size,
        }
    }
}

/// Serialises signal rows as CSV into any writer.
pub fn write_signals<W: Write>(sink: W, rows: &[SignalRow]) -> Result<()> {
    let mut writer = Writer::from_writer(sink);
    if rows.is_empty() {
        writer.write_record(["timestamp", "symbol", "signal", "position_size"])?;
    }
    for row in rows {
        writer.serialize(SignalRecord::from(row))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes signal rows to a CSV file, replacing it if it exists.
pub fn save_signals_csv<P: AsRef<Path>>(path: P, rows: &[SignalRow]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_signals(file, rows)?;
    info!(path = %path.display(), rows = rows.len(), "Signals saved");
    Ok(())
}
