// In crates/market-data/src/loader.rs

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::StrategyMetadata;
use core_types::types::CLOSE_COLUMN_PREFIX;
use csv::{ReaderBuilder, Trim};
use strategies::PriceTable;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const TIMESTAMP_COLUMN: &str = "timestamp";

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Epoch integers below this are seconds, above it milliseconds.
const EPOCH_MILLIS_CUTOFF: u64 = 100_000_000_000;

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a wide market CSV (`timestamp` plus `close_*` columns) from disk.
pub fn load_market_csv<P: AsRef<Path>>(path: P) -> Result<PriceTable> {
    let path = path.as_ref();
    let table = read_market(open(path)?)?;
    info!(path = %path.display(), rows = table.len(), "Loaded market data");
    Ok(table)
}

/// Reads only the header row of a CSV file.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(open(path.as_ref())?);
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

/// Parses market data from any reader.
///
/// Columns other than `timestamp` and `close_*` are ignored. Empty cells and
/// `NaN` become nulls.
pub fn read_market<R: Read>(source: R) -> Result<PriceTable> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let headers = reader.headers()?.clone();

    let ts_index = headers
        .iter()
        .position(|h| h == TIMESTAMP_COLUMN)
        .ok_or(Error::MissingTimestampColumn)?;
    let price_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(CLOSE_COLUMN_PREFIX))
        .map(|(i, h)| (i, h.to_string()))
        .collect();
    debug!(columns = ?price_columns.iter().map(|(_, c)| c).collect::<Vec<_>>(), "Detected price columns");

    let mut timestamps = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); price_columns.len()];

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let raw_ts = record.get(ts_index).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| Error::InvalidTimestamp {
            line,
            value: raw_ts.to_string(),
        })?;
        timestamps.push(timestamp);

        for ((index, column), column_values) in price_columns.iter().zip(values.iter_mut()) {
            let cell = record.get(*index).unwrap_or_default();
            let price = parse_price(cell).ok_or_else(|| Error::InvalidPrice {
                line,
                column: column.clone(),
                value: cell.to_string(),
            })?;
            column_values.push(price);
        }
    }

    let mut table = PriceTable::new("market", timestamps)?;
    for ((_, column), column_values) in price_columns.into_iter().zip(values) {
        table = table.with_column(column, column_values)?;
    }
    Ok(table)
}

/// `Some(None)` for a null cell, `None` if the cell is not a number.
fn parse_price(cell: &str) -> Option<Option<f64>> {
    match cell {
        "" | "NaN" | "nan" | "NA" | "null" | "None" => Some(None),
        other => other.parse::<f64>().ok().map(Some),
    }
}

/// Accepts RFC 3339, common naive date-time layouts, plain dates and epoch
/// seconds or milliseconds.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    let epoch = value.parse::<i64>().ok()?;
    let dt = if epoch.unsigned_abs() < EPOCH_MILLIS_CUTOFF {
        DateTime::from_timestamp(epoch, 0)
    } else {
        DateTime::from_timestamp_millis(epoch)
    };
    dt.map(|dt| dt.naive_utc())
}

/// Splits a market table into the anchor and target tables a strategy expects.
///
/// Rows without a target price are dropped first, so the join never sees a
/// null target.
pub fn split_market_table(market: &PriceTable, metadata: &StrategyMetadata) -> Result<(PriceTable, PriceTable)> {
    let target = metadata.targets.first().ok_or(Error::NoTarget)?;
    let target_column = target.column_name();

    let filtered = market.drop_null_rows(&target_column)?;
    if filtered.len() < market.len() {
        info!(
            target = %target,
            dropped = market.len() - filtered.len(),
            "Dropped rows without a target price"
        );
    }

    let anchor_columns: Vec<String> = metadata.anchors.iter().map(|a| a.column_name()).collect();
    let anchors = filtered.select("anchor", &anchor_columns)?;
    let target = filtered.select("target", &[target_column])?;
    Ok((anchors, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AssetSpec;

    const SAMPLE: &str = "\
timestamp,close_BTC_1H,close_ETH_2H,close_SOL_4H,volume_BTC_1H
2025-01-01 00:00:00,100.0,50.0,20.0,5
2025-01-01 01:00:00,103.0,,,6
2025-01-01 02:00:00,104.0,NaN,21.0,7
";

    fn metadata() -> StrategyMetadata {
        StrategyMetadata {
            targets: vec![AssetSpec::new("SOL", "4H")],
            anchors: vec![AssetSpec::new("BTC", "1H"), AssetSpec::new("ETH", "2H")],
        }
    }

    #[test]
    fn reads_close_columns_and_nulls() {
        let table = read_market(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["close_BTC_1H", "close_ETH_2H", "close_SOL_4H"]
        );
        assert_eq!(table.column("close_ETH_2H").unwrap(), &[Some(50.0), None, None]);
        assert!(table.column("volume_BTC_1H").is_err());
    }

    #[test]
    fn split_drops_rows_without_target_price() {
        let market = read_market(SAMPLE.as_bytes()).unwrap();
        let (anchors, target) = split_market_table(&market, &metadata()).unwrap();

        assert_eq!(anchors.len(), 2);
        assert_eq!(target.timestamps(), anchors.timestamps());
        assert_eq!(anchors.column("close_BTC_1H").unwrap(), &[Some(100.0), Some(104.0)]);
        assert_eq!(target.column("close_SOL_4H").unwrap(), &[Some(20.0), Some(21.0)]);
    }

    #[test]
    fn split_fails_on_missing_anchor_column() {
        let market = read_market(SAMPLE.as_bytes()).unwrap();
        let mut metadata = metadata();
        metadata.anchors.push(AssetSpec::new("DOGE", "1H"));

        let err = split_market_table(&market, &metadata).unwrap_err();
        assert!(err.to_string().contains("close_DOGE_1H"));
    }

    #[test]
    fn rejects_bad_cells_with_line_numbers() {
        let err = read_market("timestamp,close_BTC_1H\n2025-01-01,abc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidPrice { line: 2, .. }));

        let err = read_market("timestamp,close_BTC_1H\nyesterday,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { ref value, .. } if value == "yesterday"));

        let err = read_market("time,close_BTC_1H\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingTimestampColumn));
    }

    #[test]
    fn duplicate_timestamps_are_rejected() {
        let csv = "timestamp,close_BTC_1H\n2025-01-01,1\n2025-01-01,2\n";
        let err = read_market(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Table(strategies::Error::DuplicateTimestamp { .. })));
    }

    #[test]
    fn parses_supported_timestamp_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(4, 0, 0)
            .unwrap();
        for raw in [
            "2025-01-01 04:00:00",
            "2025-01-01T04:00:00",
            "2025-01-01 04:00",
            "2025-01-01T04:00:00Z",
            "2025-01-01T06:00:00+02:00",
            "1735704000",
            "1735704000000",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "{raw}");
        }
        assert_eq!(
            parse_timestamp("2025-01-01"),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("not a time"), None);
    }

    #[test]
    fn out_of_range_epochs_are_rejected() {
        assert_eq!(parse_timestamp("-9223372036854775808"), None);
        assert_eq!(parse_timestamp("9223372036854775807"), None);

        let err = read_market("timestamp,close_BTC_1H
-9223372036854775808,1
".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { line: 2, .. }));
    }
}
