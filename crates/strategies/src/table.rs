// In crates/strategies/src/table.rs

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// A column-oriented table of nullable closing prices keyed by timestamp.
///
/// Timestamps are unique within a table but not necessarily sorted; the
/// aligner is responsible for ordering. `NaN` cells are stored as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    name: String,
    timestamps: Vec<NaiveDateTime>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    /// Creates an empty-column table. Fails if `timestamps` contains duplicates.
    pub fn new(name: impl Into<String>, timestamps: Vec<NaiveDateTime>) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::with_capacity(timestamps.len());
        if let Some(duplicate) = timestamps.iter().find(|ts| !seen.insert(**ts)) {
            return Err(Error::DuplicateTimestamp {
                table: name,
                timestamp: *duplicate,
            });
        }
        Ok(Self {
            name,
            timestamps,
            columns: BTreeMap::new(),
        })
    }

    /// Adds (or replaces) a price column.
    pub fn with_column(mut self, column: impl Into<String>, values: Vec<Option<f64>>) -> Result<Self> {
        let column = column.into();
        if values.len() != self.timestamps.len() {
            return Err(Error::LengthMismatch {
                table: self.name,
                column,
                expected: self.timestamps.len(),
                found: values.len(),
            });
        }

        let mut cleaned = Vec::with_capacity(values.len());
        for (value, timestamp) in values.into_iter().zip(&self.timestamps) {
            match value {
                Some(v) if v.is_nan() => cleaned.push(None),
                Some(v) if v.is_infinite() => {
                    return Err(Error::InvalidPrice {
                        column,
                        timestamp: *timestamp,
                        value: v,
                    });
                }
                other => cleaned.push(other),
            }
        }

        self.columns.insert(column, cleaned);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Looks up a column by name, failing with [`Error::MissingColumn`] if absent.
    pub fn column(&self, column: &str) -> Result<&[Option<f64>]> {
        self.columns
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Builds a new table holding only the named columns.
    pub fn select(&self, name: impl Into<String>, columns: &[String]) -> Result<Self> {
        let mut selected = BTreeMap::new();
        for column in columns {
            selected.insert(column.clone(), self.column(column)?.to_vec());
        }
        Ok(Self {
            name: name.into(),
            timestamps: self.timestamps.clone(),
            columns: selected,
        })
    }

    /// Keeps only the rows where `column` holds a price.
    pub fn drop_null_rows(&self, column: &str) -> Result<Self> {
        let keep: Vec<bool> = self.column(column)?.iter().map(Option::is_some).collect();
        let pick = |values: &[Option<f64>]| -> Vec<Option<f64>> {
            values
                .iter()
                .zip(&keep)
                .filter_map(|(value, keep)| keep.then_some(*value))
                .collect()
        };

        Ok(Self {
            name: self.name.clone(),
            timestamps: self
                .timestamps
                .iter()
                .zip(&keep)
                .filter_map(|(ts, keep)| keep.then_some(*ts))
                .collect(),
            columns: self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), pick(values)))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let err = PriceTable::new("anchor", vec![ts(0), ts(1), ts(0)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateTimestamp { timestamp, .. } if timestamp == ts(0)));
    }

    #[test]
    fn nan_cells_become_null_and_infinite_cells_fail() {
        let table = PriceTable::new("target", vec![ts(0), ts(1)])
            .unwrap()
            .with_column("close_SOL_4H", vec![Some(f64::NAN), Some(10.0)])
            .unwrap();
        assert_eq!(table.column("close_SOL_4H").unwrap(), &[None, Some(10.0)]);

        let err = PriceTable::new("target", vec![ts(0)])
            .unwrap()
            .with_column("close_SOL_4H", vec![Some(f64::INFINITY)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPrice { .. }));
    }

    #[test]
    fn column_length_must_match_timestamps() {
        let err = PriceTable::new("anchor", vec![ts(0), ts(1)])
            .unwrap()
            .with_column("close_BTC_1H", vec![Some(1.0)])
            .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn missing_column_names_table_and_column() {
        let table = PriceTable::new("anchor", vec![ts(0)]).unwrap();
        let err = table.column("close_ETH_2H").unwrap_err();
        assert_eq!(err.to_string(), "Column 'close_ETH_2H' not found in anchor table");
    }

    #[test]
    fn drop_null_rows_filters_every_column_consistently() {
        let table = PriceTable::new("market", vec![ts(0), ts(1), ts(2)])
            .unwrap()
            .with_column("close_SOL_4H", vec![Some(1.0), None, Some(3.0)])
            .unwrap()
            .with_column("close_BTC_1H", vec![Some(10.0), Some(20.0), None])
            .unwrap();

        let filtered = table.drop_null_rows("close_SOL_4H").unwrap();
        assert_eq!(filtered.timestamps(), &[ts(0), ts(2)]);
        assert_eq!(filtered.column("close_BTC_1H").unwrap(), &[Some(10.0), None]);
    }
}
