// In app/src/pipeline.rs

use std::path::Path;

use anyhow::{Context, Result};
use core_types::{AssetSpec, SignalRow};
use strategies::Strategy;

/// Loads market data, splits it per the strategy's metadata and runs the strategy.
pub fn generate(strategy: &dyn Strategy, input: &Path) -> Result<Vec<SignalRow>> {
    let market = market_data::load_market_csv(input)
        .with_context(|| format!("Failed to load market data from {}", input.display()))?;
    let (anchors, target) = market_data::split_market_table(&market, &strategy.metadata())?;

    let rows = strategy.generate_signals(&anchors, &target)?;
    tracing::info!(rows = rows.len(), "Signals generated");
    Ok(rows)
}

/// Fails with every missing column listed if `input` cannot feed the strategy.
pub fn validate(strategy: &dyn Strategy, input: &Path) -> Result<()> {
    let header = market_data::read_header(input)
        .with_context(|| format!("Failed to read header of {}", input.display()))?;
    let missing = strategy.metadata().missing_columns(header.iter().map(String::as_str));
    if !missing.is_empty() {
        let available: Vec<String> = header
            .iter()
            .filter_map(|column| AssetSpec::from_column_name(column).ok())
            .map(|spec| spec.to_string())
            .collect();
        anyhow::bail!(
            "{} is missing required columns: {} (available series: {})",
            input.display(),
            missing.join(", "),
            if available.is_empty() { "none".to_string() } else { available.join(", ") }
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Signal;
    use std::fs;
    use strategies::pairwise_pump::PairwisePump;
    use strategies::types::PairwisePumpSettings;
    use tempfile::tempdir;

    const MARKET: &str = "\
timestamp,close_BTC_1H,close_ETH_2H,close_SOL_4H
2025-01-01 00:00:00,100.0,50.0,20.0
2025-01-01 01:00:00,101.0,50.0,
2025-01-01 04:00:00,105.0,50.5,20.2
2025-01-01 08:00:00,105.0,50.5,21.5
";

    #[test]
    fn generates_one_row_per_priced_target_timestamp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("market.csv");
        fs::write(&path, MARKET).unwrap();

        let strategy = PairwisePump::new(PairwisePumpSettings::default());
        let rows = generate(&strategy, &path).unwrap();

        // The 01:00 row has no SOL price and is dropped before the join, so
        // BTC's return at 04:00 is measured against 00:00 (+5%).
        let signals: Vec<_> = rows.iter().map(|r| r.signal).collect();
        assert_eq!(signals, vec![Signal::Hold, Signal::Buy, Signal::Sell]);
    }

    #[test]
    fn validate_lists_missing_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("market.csv");
        fs::write(&path, "timestamp,close_BTC_1H\n").unwrap();

        let strategy = PairwisePump::new(PairwisePumpSettings::default());
        let err = validate(&strategy, &path).unwrap_err();
        assert!(err.to_string().contains("close_ETH_2H, close_SOL_4H"));
        assert!(err.to_string().ends_with("(available series: BTC/1H)"));
    }

    #[test]
    fn missing_input_file_has_context() {
        let strategy = PairwisePump::new(PairwisePumpSettings::default());
        let err = generate(&strategy, Path::new("/nonexistent/market.csv")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load market data"));
    }
}
