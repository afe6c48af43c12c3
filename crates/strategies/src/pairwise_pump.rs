// In crates/strategies/src/pairwise_pump.rs

use core_types::{Signal, SignalRow, StrategyMetadata, Symbol};
use tracing::{debug, info, warn};

use crate::aligner::{self, UnifiedTable};
use crate::error::{Error, Result};
use crate::table::PriceTable;
use crate::types::PairwisePumpSettings;
use crate::Strategy;

/// Whether the strategy is flat or long, and at what price it entered.
///
/// `entry_price` is positive while holding and zero while flat.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionState {
    in_position: bool,
    entry_price: f64,
}

impl PositionState {
    pub const FLAT: Self = Self {
        in_position: false,
        entry_price: 0.0,
    };

    pub fn holding(entry_price: f64) -> Self {
        Self {
            in_position: true,
            entry_price,
        }
    }

    pub fn in_position(&self) -> bool {
        self.in_position
    }

    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }
}

/// The signal and allocation chosen for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub signal: Signal,
    pub position_size: f64,
}

/// Buys the target when any anchor pumps, then exits on take-profit or stop-loss.
#[derive(Debug, Clone)]
pub struct PairwisePump {
    settings: PairwisePumpSettings,
}

impl PairwisePump {
    pub fn new(settings: PairwisePumpSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PairwisePumpSettings {
        &self.settings
    }

    /// A missing return never counts as a pump.
    fn is_pump(&self, period_return: Option<f64>) -> bool {
        period_return.is_some_and(|r| r > self.settings.pump_threshold)
    }

    /// Advances the position state by one row.
    ///
    /// Pure: the returned state replaces `state`, nothing else is touched.
    /// A zero or negative price is treated like a missing one.
    pub fn step(&self, state: PositionState, pumped: bool, price: Option<f64>) -> (PositionState, Decision) {
        let price = usable_price(price);
        let hold_flat = Decision {
            signal: Signal::Hold,
            position_size: 0.0,
        };
        let hold_long = Decision {
            signal: Signal::Hold,
            position_size: self.settings.position_size,
        };

        if !state.in_position {
            return match price {
                Some(price) if pumped => (
                    PositionState::holding(price),
                    Decision {
                        signal: Signal::Buy,
                        position_size: self.settings.position_size,
                    },
                ),
                _ => (state, hold_flat),
            };
        }

        match price {
            Some(price) if state.entry_price > 0.0 => {
                let profit_pct = (price - state.entry_price) / state.entry_price;
                if profit_pct >= self.settings.take_profit_pct || profit_pct <= self.settings.stop_loss_pct {
                    (
                        PositionState::FLAT,
                        Decision {
                            signal: Signal::Sell,
                            position_size: 0.0,
                        },
                    )
                } else {
                    (state, hold_long)
                }
            }
            // No usable price: keep the position and the original entry.
            _ => (state, hold_long),
        }
    }

    /// Runs the decision loop over an already merged table.
    pub fn evaluate(&self, table: &UnifiedTable) -> Result<Vec<SignalRow>> {
        let symbol = Symbol(self.settings.target.symbol.clone());

        let (_, rows) = table.rows().fold(
            (PositionState::FLAT, Vec::with_capacity(table.len())),
            |(state, mut rows), row| {
                let price = row.target_price();
                let pumped = row.anchor_returns().any(|r| self.is_pump(r));
                let (next, decision) = self.step(state, pumped, price);

                if next != state {
                    debug!(
                        timestamp = %row.timestamp(),
                        signal = %decision.signal,
                        entry_price = next.entry_price,
                        "Position state changed"
                    );
                } else if state.in_position && usable_price(price).is_none() {
                    warn!(
                        timestamp = %row.timestamp(),
                        price = ?price,
                        "No usable target price while holding; carrying position forward"
                    );
                }

                rows.push(SignalRow {
                    timestamp: row.timestamp(),
                    symbol: symbol.clone(),
                    signal: decision.signal,
                    position_size: decision.position_size,
                });
                (next, rows)
            },
        );

        Ok(rows)
    }

    fn run(&self, anchors: &PriceTable, target: &PriceTable) -> Result<Vec<SignalRow>> {
        let table = aligner::merge(anchors, &self.settings.anchors, target, &self.settings.target)?;
        info!(
            anchor_rows = anchors.len(),
            target_rows = target.len(),
            aligned_rows = table.len(),
            "Merged anchor and target series"
        );
        self.evaluate(&table)
    }
}

fn usable_price(price: Option<f64>) -> Option<f64> {
    price.filter(|p| *p > 0.0)
}

impl Strategy for PairwisePump {
    fn name(&self) -> &'static str {
        "PairwisePump"
    }

    fn metadata(&self) -> StrategyMetadata {
        self.settings.metadata()
    }

    fn generate_signals(&self, anchors: &PriceTable, target: &PriceTable) -> Result<Vec<SignalRow>> {
        self.run(anchors, target).map_err(|source| Error::Generation {
            strategy: self.name(),
            source: Box::new(source),
        })
    }
}
