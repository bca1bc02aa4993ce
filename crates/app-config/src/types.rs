// In crates/app-config/src/types.rs

use serde::Deserialize;
use std::path::PathBuf;

use core_types::StrategyConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Where replays look for their inputs by default.
    #[serde(default)]
    pub replay: ReplaySettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Worker threads for running pairs side by side. `0` lets rayon decide.
    #[serde(default)]
    pub replay_threads: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ReplaySettings {
    /// The run file used when none is given on the command line.
    #[serde(default = "default_run_file")]
    pub run_file: PathBuf,
    /// Relative snapshot paths in the run file are resolved against this.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            run_file: default_run_file(),
            data_dir: default_data_dir(),
        }
    }
}

// --- Structs for the run file ---

/// The top-level configuration for a replay run.
#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    #[serde(rename = "pairs")]
    pub pair_configs: Vec<PairConfig>,
}

impl RunConfig {
    pub fn enabled_pairs(&self) -> impl Iterator<Item = &PairConfig> {
        self.pair_configs.iter().filter(|p| p.enabled)
    }
}

/// Configuration for a single trading pair/asset.
#[derive(Deserialize, Debug, Clone)]
pub struct PairConfig {
    pub symbol: String,
    /// JSON-lines file of indicator snapshots exported by the host.
    pub snapshots: PathBuf,
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    pub strategies: Vec<StrategyConfig>,
}

/// Helper functions for serde defaults
fn default_enabled() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_run_file() -> PathBuf { PathBuf::from("config/run.toml") }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
