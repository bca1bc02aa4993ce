use crate::error::{Error, Result};
use crate::rsi_bull_bear_adx::RsiBullBearAdx;
use crate::types::RsiBullBearAdxSettings;
use crate::Strategy;
use core_types::StrategyConfig;

/// Name under which the advisor is configured in run files.
pub const RSI_BULL_BEAR_ADX: &str = "rsi_bull_bear_adx";

/// Builds one strategy instance from its run-file entry.
pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy + Send>> {
    let strategy: Box<dyn Strategy + Send> = match config.name.as_str() {
        RSI_BULL_BEAR_ADX | "RSI_BULL_BEAR_ADX" => {
            let settings: RsiBullBearAdxSettings = config.params.clone().try_into()?;
            Box::new(RsiBullBearAdx::new(settings)?)
        }
        unknown => return Err(Error::UnknownStrategy(unknown.to_string())),
    };
    Ok(strategy)
}

/// Builds every strategy configured for a pair, failing on the first bad one.
pub fn create_strategies(configs: &[StrategyConfig]) -> Result<Vec<Box<dyn Strategy + Send>>> {
    configs.iter().map(create_strategy).collect()
}
