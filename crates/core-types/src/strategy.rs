use serde::{Deserialize, Serialize};
use toml::Value;

use crate::types::AssetSpec;

#[derive(Deserialize, Debug, Clone)]
pub struct StrategyConfig {
    pub name: String,
    // This will hold the `params = { ... }` table from the TOML
    #[serde(default = "empty_params")]
    pub params: Value,
}

fn empty_params() -> Value {
    Value::Table(Default::default())
}

/// Describes the price series a strategy needs.
///
/// Serialises to `{ "targets": [...], "anchors": [...] }` so an orchestration
/// layer can check supplied data against it before calling the strategy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StrategyMetadata {
    pub targets: Vec<AssetSpec>,
    pub anchors: Vec<AssetSpec>,
}

impl StrategyMetadata {
    /// All column names the strategy will read, anchors first.
    pub fn required_columns(&self) -> Vec<String> {
        self.anchors
            .iter()
            .chain(self.targets.iter())
            .map(AssetSpec::column_name)
            .collect()
    }

    /// Returns the required columns not present in `available`.
    pub fn missing_columns<'a, I>(&self, available: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: Vec<&str> = available.into_iter().collect();
        self.required_columns()
            .into_iter()
            .filter(|column| !available.contains(&column.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> StrategyMetadata {
        StrategyMetadata {
            targets: vec![AssetSpec::new("SOL", "4H")],
            anchors: vec![AssetSpec::new("BTC", "1H"), AssetSpec::new("ETH", "2H")],
        }
    }

    #[test]
    fn metadata_serialises_with_targets_and_anchors_keys() {
        let json = serde_json::to_value(metadata()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "targets": [{"symbol": "SOL", "timeframe": "4H"}],
                "anchors": [
                    {"symbol": "BTC", "timeframe": "1H"},
                    {"symbol": "ETH", "timeframe": "2H"}
                ]
            })
        );
    }

    #[test]
    fn missing_columns_reports_every_absent_series() {
        let header = ["timestamp", "close_BTC_1H", "close_XRP_1H"];
        assert_eq!(
            metadata().missing_columns(header),
            vec!["close_ETH_2H".to_string(), "close_SOL_4H".to_string()]
        );
    }

    #[test]
    fn strategy_config_params_default_to_empty_table() {
        let config: StrategyConfig = toml::from_str("name = \"pairwise_pump\"").unwrap();
        assert_eq!(config.name, "pairwise_pump");
        assert!(config.params.as_table().is_some_and(|t| t.is_empty()));
    }
}
