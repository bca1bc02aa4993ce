// In crates/strategies/src/error.rs

use thiserror::Error;

/// Configuration problems. All of them are fatal and surface when a strategy
/// is constructed, never while it runs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Setting `{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Setting `{field}` must be a period of at least 1 candle")]
    InvalidPeriod { field: &'static str },

    #[error("`{low_field}` ({low}) must be below `{high_field}` ({high})")]
    InvertedThresholds {
        low_field: &'static str,
        high_field: &'static str,
        low: f64,
        high: f64,
    },

    #[error("Attempted to create unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid strategy parameters: {0}")]
    Params(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
