// In crates/strategies/src/types.rs

use core_types::{AssetSpec, StrategyMetadata};
use serde::{Deserialize, Serialize};

/// An anchor period return strictly above this counts as a pump.
pub const PUMP_THRESHOLD: f64 = 0.02;
/// Close the position once profit reaches this fraction of the entry price.
pub const TAKE_PROFIT_PCT: f64 = 0.05;
/// Close the position once the loss reaches this fraction (negative).
pub const STOP_LOSS_PCT: f64 = -0.03;
/// Fraction of capital allocated while a trade is open.
pub const POSITION_SIZE: f64 = 0.5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PairwisePumpSettings {
    pub pump_threshold: f64,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
    pub position_size: f64,

    // The asset we trade and the assets whose moves trigger entries.
    pub target: AssetSpec,
    pub anchors: Vec<AssetSpec>,
}

impl Default for PairwisePumpSettings {
    fn default() -> Self {
        Self {
            pump_threshold: PUMP_THRESHOLD,
            take_profit_pct: TAKE_PROFIT_PCT,
            stop_loss_pct: STOP_LOSS_PCT,
            position_size: POSITION_SIZE,
            target: AssetSpec::new("SOL", "4H"),
            anchors: vec![AssetSpec::new("BTC", "1H"), AssetSpec::new("ETH", "2H")],
        }
    }
}

impl PairwisePumpSettings {
    pub fn metadata(&self) -> StrategyMetadata {
        StrategyMetadata {
            targets: vec![self.target.clone()],
            anchors: self.anchors.clone(),
        }
    }

    /// Checks the thresholds describe a sensible long-only variant.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.anchors.is_empty() {
            anyhow::bail!("pairwise_pump needs at least one anchor");
        }
        if !(self.position_size > 0.0 && self.position_size <= 1.0) {
            anyhow::bail!("position_size must be in (0, 1], got {}", self.position_size);
        }
        if !(self.take_profit_pct > 0.0) {
            anyhow::bail!("take_profit_pct must be positive, got {}", self.take_profit_pct);
        }
        if !(self.stop_loss_pct < 0.0) {
            anyhow::bail!("stop_loss_pct must be negative, got {}", self.stop_loss_pct);
        }
        if !self.pump_threshold.is_finite() {
            anyhow::bail!("pump_threshold must be finite");
        }
        Ok(())
    }
}
