// In crates/market-data/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No 'timestamp' column in market data header")]
    MissingTimestampColumn,

    #[error("Unparseable timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: u64, value: String },

    #[error("Unparseable price '{value}' in column '{column}' on line {line}")]
    InvalidPrice { line: u64, column: String, value: String },

    #[error("Strategy metadata declares no target")]
    NoTarget,

    #[error(transparent)]
    Table(#[from] strategies::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
