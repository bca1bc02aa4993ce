// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};
use std::collections::HashSet;
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, PairConfig, ReplaySettings, RunConfig, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name("config/base"))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // 3. Load settings from environment variables (e.g., `APP_APP__LOG_LEVEL=debug`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Builds settings from a single TOML document, without the file and
/// environment layers.
pub fn settings_from_toml(content: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from_str(content, FileFormat::Toml))
        .build()?;
    Ok(settings.try_deserialize()?)
}

/// Loads a replay run file.
pub fn load_run_config(path: impl AsRef<Path>) -> Result<RunConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_run_config(&content)
}

/// Parses and sanity-checks a run file's contents. Strategy parameters are
/// left for the strategy factory to validate.
pub fn parse_run_config(content: &str) -> Result<RunConfig> {
    let config: RunConfig = toml::from_str(content)?;

    let mut seen = HashSet::new();
    for pair in &config.pair_configs {
        if !seen.insert(pair.symbol.as_str()) {
            return Err(Error::DuplicatePair(pair.symbol.clone()));
        }
        if pair.enabled && pair.strategies.is_empty() {
            return Err(Error::NoStrategies(pair.symbol.clone()));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const RUN_FILE: &str = r#"
        [[pairs]]
        symbol = "BTCUSDT"
        snapshots = "btcusdt.jsonl"

        [[pairs.strategies]]
        name = "rsi_bull_bear_adx"
        params = { SMA_long = 1000, SMA_short = 50 }

        [[pairs]]
        symbol = "ETHUSDT"
        snapshots = "ethusdt.jsonl"
        enabled = false
        strategies = []
    "#;

    #[test]
    fn parses_run_file() {
        let config = parse_run_config(RUN_FILE).unwrap();

        assert_eq!(config.pair_configs.len(), 2);
        let enabled: Vec<_> = config.enabled_pairs().map(|p| p.symbol.as_str()).collect();
        assert_eq!(enabled, vec!["BTCUSDT"]);

        let btc = &config.pair_configs[0];
        assert_eq!(btc.snapshots, PathBuf::from("btcusdt.jsonl"));
        assert_eq!(btc.strategies[0].name, "rsi_bull_bear_adx");
    }

    #[test]
    fn rejects_duplicate_pairs() {
        let content = r#"
            [[pairs]]
            symbol = "BTCUSDT"
            snapshots = "a.jsonl"
            strategies = [{ name = "rsi_bull_bear_adx", params = {} }]

            [[pairs]]
            symbol = "BTCUSDT"
            snapshots = "b.jsonl"
            strategies = [{ name = "rsi_bull_bear_adx", params = {} }]
        "#;
        assert!(matches!(parse_run_config(content), Err(Error::DuplicatePair(s)) if s == "BTCUSDT"));
    }

    #[test]
    fn rejects_enabled_pair_without_strategies() {
        let content = r#"
            [[pairs]]
            symbol = "BTCUSDT"
            snapshots = "a.jsonl"
            strategies = []
        "#;
        assert!(matches!(parse_run_config(content), Err(Error::NoStrategies(_))));
    }

    #[test]
    fn missing_run_file_names_the_path() {
        let err = load_run_config("does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn settings_fill_in_defaults() {
        let settings = settings_from_toml(
            r#"
            [app]
            environment = "development"
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.log_level, "info");
        assert_eq!(settings.app.replay_threads, 0);
        assert_eq!(settings.replay.run_file, PathBuf::from("config/run.toml"));
        assert_eq!(settings.replay.data_dir, PathBuf::from("data"));
    }
}
