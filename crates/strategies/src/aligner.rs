// In crates/strategies/src/aligner.rs

use std::collections::HashMap;

use chrono::NaiveDateTime;
use core_types::AssetSpec;

use crate::error::Result;
use crate::table::PriceTable;

/// Prices and period returns of one anchor, aligned to the unified index.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorSeries {
    pub spec: AssetSpec,
    pub prices: Vec<Option<f64>>,
    pub returns: Vec<Option<f64>>,
}

/// The inner join of the anchor and target tables, sorted by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedTable {
    pub timestamps: Vec<NaiveDateTime>,
    pub target: Vec<Option<f64>>,
    pub anchors: Vec<AnchorSeries>,
}

/// A borrowed view of one row of a [`UnifiedTable`].
#[derive(Debug, Clone, Copy)]
pub struct UnifiedRow<'a> {
    table: &'a UnifiedTable,
    index: usize,
}

impl<'a> UnifiedRow<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.table.timestamps[self.index]
    }

    pub fn target_price(&self) -> Option<f64> {
        self.table.target[self.index]
    }

    /// The period return of every anchor at this row, in anchor order.
    pub fn anchor_returns(&self) -> impl Iterator<Item = Option<f64>> + 'a {
        let (table, index) = (self.table, self.index);
        table.anchors.iter().map(move |anchor| anchor.returns[index])
    }
}

impl UnifiedTable {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = UnifiedRow<'_>> {
        (0..self.len()).map(move |index| UnifiedRow { table: self, index })
    }
}

/// Joins `anchors` and `target` on exact timestamp equality.
///
/// Only timestamps present in both tables survive. The result is sorted
/// ascending and anchor returns are computed over the joined rows, so a gap
/// in the join shows up as a longer period rather than as a null.
pub fn merge(
    anchors: &PriceTable,
    anchor_specs: &[AssetSpec],
    target: &PriceTable,
    target_spec: &AssetSpec,
) -> Result<UnifiedTable> {
    // Resolve every referenced column before doing any work.
    let target_prices = target.column(&target_spec.column_name())?;
    let anchor_prices = anchor_specs
        .iter()
        .map(|spec| anchors.column(&spec.column_name()).map(|prices| (spec, prices)))
        .collect::<Result<Vec<_>>>()?;

    let anchor_index: HashMap<NaiveDateTime, usize> = anchors
        .timestamps()
        .iter()
        .enumerate()
        .map(|(i, ts)| (*ts, i))
        .collect();

    // (timestamp, target row, anchor row)
    let mut joined: Vec<(NaiveDateTime, usize, usize)> = target
        .timestamps()
        .iter()
        .enumerate()
        .filter_map(|(t, ts)| anchor_index.get(ts).map(|a| (*ts, t, *a)))
        .collect();
    joined.sort_unstable_by_key(|(ts, _, _)| *ts);

    let anchors = anchor_prices
        .into_iter()
        .map(|(spec, prices)| {
            let prices: Vec<Option<f64>> = joined.iter().map(|(_, _, a)| prices[*a]).collect();
            AnchorSeries {
                spec: spec.clone(),
                returns: period_returns(&prices),
                prices,
            }
        })
        .collect();

    Ok(UnifiedTable {
        timestamps: joined.iter().map(|(ts, _, _)| *ts).collect(),
        target: joined.iter().map(|(_, t, _)| target_prices[*t]).collect(),
        anchors,
    })
}

/// Simple returns `(p[t] - p[t-1]) / p[t-1]`.
///
/// The first row is always `None`, as is any row where either price is
/// missing or the prior price is zero.
pub fn period_returns(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return returns;
    }
    returns.push(None);
    returns.extend(prices.windows(2).map(|w| match (w[0], w[1]) {
        (Some(prev), Some(curr)) if prev != 0.0 => Some((curr - prev) / prev),
        _ => None,
    }));
    returns
}
