// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Unknown signal token: '{0}' (expected BUY, SELL or HOLD)")]
    UnknownSignal(String),

    #[error("Invalid column name '{0}': expected close_<SYMBOL>_<TIMEFRAME>")]
    InvalidColumnName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
