use serde::Deserialize;
use toml::Value;

/// One `[[pairs.strategies]]` entry of a run file.
#[derive(Deserialize, Debug, Clone)]
pub struct StrategyConfig {
    pub name: String,
    // This will hold the `params = { ... }` table from the TOML
    pub params: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_table_is_kept_verbatim() {
        let cfg: StrategyConfig = toml::from_str(
            r#"
            name = "rsi_bull_bear_adx"
            params = { SMA_long = 1000, BULL_RSI_high = 80.0 }
            "#,
        )
        .unwrap();

        assert_eq!(cfg.name, "rsi_bull_bear_adx");
        assert_eq!(cfg.params.get("SMA_long").and_then(Value::as_integer), Some(1000));
        assert_eq!(cfg.params.get("BULL_RSI_high").and_then(Value::as_float), Some(80.0));
    }
}
