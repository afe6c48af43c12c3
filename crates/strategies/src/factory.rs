use anyhow::Result;
use core_types::StrategyConfig;

use crate::pairwise_pump::PairwisePump;
use crate::types::PairwisePumpSettings;
use crate::Strategy;

pub fn create_strategy(strat_config: &StrategyConfig) -> Result<Box<dyn Strategy + Send + Sync>> {
    let strategy_instance: Box<dyn Strategy + Send + Sync> = match strat_config.name.as_str() {
        "pairwise_pump" => {
            let settings: PairwisePumpSettings = strat_config.params.clone().try_into()?;
            settings.validate()?;
            Box::new(PairwisePump::new(settings))
        }
        unknown => anyhow::bail!("Attempted to create unknown strategy: {}", unknown),
    };

    Ok(strategy_instance)
}
