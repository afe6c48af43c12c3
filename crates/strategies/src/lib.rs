// In crates/strategies/src/lib.rs

use core_types::{SignalRow, StrategyMetadata};

pub mod aligner;
pub mod error;
pub mod factory;
pub mod pairwise_pump;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use table::PriceTable;

/// The universal interface for a signal-generating strategy.
///
/// A strategy turns an anchor table and a target table into one `SignalRow`
/// per aligned timestamp. Each call is independent: any position state lives
/// only for the duration of a single `generate_signals` pass.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The price series this strategy reads.
    fn metadata(&self) -> StrategyMetadata;

    fn generate_signals(&self, anchors: &PriceTable, target: &PriceTable) -> Result<Vec<SignalRow>>;
}
