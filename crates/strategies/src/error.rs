// In crates/strategies/src/error.rs

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Column '{column}' not found in {table} table")]
    MissingColumn { table: String, column: String },

    #[error("Column '{column}' has {found} values but the {table} table has {expected} timestamps")]
    LengthMismatch {
        table: String,
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate timestamp {timestamp} in {table} table")]
    DuplicateTimestamp { table: String, timestamp: NaiveDateTime },

    #[error("Invalid price {value} in column '{column}' at {timestamp}")]
    InvalidPrice {
        column: String,
        timestamp: NaiveDateTime,
        value: f64,
    },

    #[error("Error in {strategy} signal generation: {source}")]
    Generation {
        strategy: &'static str,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
