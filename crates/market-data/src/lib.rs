// In crates/market-data/src/lib.rs

//! CSV input and output for strategy runs.
//!
//! The loader turns a wide market file into the anchor and target tables a
//! strategy consumes; the writer persists the resulting signal table.

pub mod error;
pub mod loader;
pub mod writer;

pub use error::{Error, Result};
pub use loader::{load_market_csv, parse_timestamp, read_header, read_market, split_market_table};
pub use writer::{save_signals_csv, write_signals};
