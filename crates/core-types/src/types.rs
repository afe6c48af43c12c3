// In crates/core-types/src/types.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Prefix shared by every price column, e.g. `close_BTC_1H`.
pub const CLOSE_COLUMN_PREFIX: &str = "close_";

/// A tradable asset symbol such as `BTC` or `SOL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// One (symbol, timeframe) pair a strategy reads prices for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetSpec {
    pub symbol: String,
    pub timeframe: String,
}

impl AssetSpec {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
        }
    }

    /// The name of the closing-price column for this asset: `close_<SYMBOL>_<TIMEFRAME>`.
    pub fn column_name(&self) -> String {
        format!("{}{}_{}", CLOSE_COLUMN_PREFIX, self.symbol, self.timeframe)
    }

    /// Parses a `close_<SYMBOL>_<TIMEFRAME>` column name back into its parts.
    /// The timeframe is everything after the last underscore.
    pub fn from_column_name(column: &str) -> Result<Self> {
        let rest = column
            .strip_prefix(CLOSE_COLUMN_PREFIX)
            .ok_or_else(|| Error::InvalidColumnName(column.to_string()))?;
        match rest.rsplit_once('_') {
            Some((symbol, timeframe)) if !symbol.is_empty() && !timeframe.is_empty() => {
                Ok(Self::new(symbol, timeframe))
            }
            _ => Err(Error::InvalidColumnName(column.to_string())),
        }
    }
}

impl fmt::Display for AssetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.symbol, self.timeframe)
    }
}

/// The discrete trading decision emitted for one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// The literal token written to the output table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BUY" => Ok(Signal::Buy),
            "SELL" => Ok(Signal::Sell),
            "HOLD" => Ok(Signal::Hold),
            other => Err(Error::UnknownSignal(other.to_string())),
        }
    }
}

/// One row of strategy output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    pub timestamp: NaiveDateTime,
    pub symbol: Symbol,
    pub signal: Signal,
    /// Fraction of capital allocated to the target after this row, in `[0, 1]`.
    pub position_size: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_name_follows_close_symbol_timeframe_convention() {
        let spec = AssetSpec::new("SOL", "4H");
        assert_eq!(spec.column_name(), "close_SOL_4H");
        assert_eq!(AssetSpec::from_column_name("close_SOL_4H").unwrap(), spec);
    }

    #[test]
    fn column_name_parsing_rejects_foreign_columns() {
        assert_eq!(
            AssetSpec::from_column_name("volume_BTC_1H"),
            Err(Error::InvalidColumnName("volume_BTC_1H".into()))
        );
        assert!(AssetSpec::from_column_name("close_BTC").is_err());
        assert!(AssetSpec::from_column_name("close__1H").is_err());
    }

    #[test]
    fn signal_tokens_are_uppercase_literals() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!("SELL".parse::<Signal>().unwrap(), Signal::Sell);
        assert_eq!(serde_json::to_string(&Signal::Hold).unwrap(), "\"HOLD\"");
        assert!("buy".parse::<Signal>().is_err());
    }
}
