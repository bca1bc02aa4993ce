// In crates/core-types/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The indicator outputs the host computes for a single closed candle.
///
/// The advisor reads these once per candle and never keeps them around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Long-period simple moving average.
    #[serde(alias = "maSlow")]
    pub ma_slow: f64,
    /// Short-period simple moving average.
    #[serde(alias = "maFast")]
    pub ma_fast: f64,
    /// RSI computed with the bull-regime period.
    #[serde(alias = "bullRsi", alias = "BULL_RSI")]
    pub bull_rsi: f64,
    /// RSI computed with the bear-regime period.
    #[serde(alias = "bearRsi", alias = "BEAR_RSI")]
    pub bear_rsi: f64,
    /// Average Directional Index, used as a trend-strength modifier.
    #[serde(alias = "ADX")]
    pub adx: f64,
}

/// The direction of a trading advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => f.write_str("long"),
            Side::Short => f.write_str("short"),
        }
    }
}

/// A directional signal handed back to the host on a trend change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub side: Side,
    /// The host's candle age at which the advice was produced.
    pub candle: u64,
}

/// Market regime derived from the moving-average crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Bull,
    Bear,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Bull => f.write_str("BULL"),
            Regime::Bear => f.write_str("BEAR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    #[default]
    None,
    Up,
    Down,
}

impl TrendDirection {
    /// The trend a given side of advice leads into.
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Long => TrendDirection::Up,
            Side::Short => TrendDirection::Down,
        }
    }
}

/// RSI bounds in effect for one evaluation, after the ADX adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub high: f64,
    pub low: f64,
}

/// What the advisor saw and decided on one candle. Handed to observers only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub candle: u64,
    pub regime: Regime,
    pub rsi: f64,
    pub adx: f64,
    pub thresholds: Thresholds,
    /// The side the rules asked for, before trend de-duplication.
    pub request: Option<Side>,
}
