// In crates/core-types/src/lib.rs

pub mod error;
pub mod host;
pub mod strategy;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use host::{AdviceSink, IndicatorProvider};
pub use strategy::StrategyConfig;
pub use types::{
    Advice, Evaluation, IndicatorSnapshot, Regime, Side, Thresholds, TrendDirection,
};
