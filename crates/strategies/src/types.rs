// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the advisor treats candles seen before the long moving average has
/// a full window behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarmupPolicy {
    /// Log the shortfall once and keep advising.
    #[default]
    Advisory,
    /// Keep evaluating but drop every request until the window is full.
    Enforce,
}

/// Settings for the RSI Bull/Bear + ADX advisor.
///
/// Keys follow the host's parameter names so an existing strategy TOML can be
/// dropped in unchanged. The indicator periods are not used by the decision
/// rules themselves; they describe what the host must compute, and `SMA_long`
/// doubles as the warm-up length.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RsiBullBearAdxSettings {
    #[serde(rename = "SMA_short")]
    pub sma_short: u32,
    #[serde(rename = "SMA_long")]
    pub sma_long: u32,

    #[serde(rename = "BULL_RSI_period", alias = "BULL_RSI")]
    pub bull_rsi_period: u32,
    #[serde(rename = "BULL_RSI_high")]
    pub bull_rsi_high: f64,
    #[serde(rename = "BULL_RSI_low")]
    pub bull_rsi_low: f64,

    #[serde(rename = "BEAR_RSI_period", alias = "BEAR_RSI")]
    pub bear_rsi_period: u32,
    #[serde(rename = "BEAR_RSI_high")]
    pub bear_rsi_high: f64,
    #[serde(rename = "BEAR_RSI_low")]
    pub bear_rsi_low: f64,

    #[serde(rename = "ADX_period", alias = "ADX")]
    pub adx_period: u32,
    #[serde(rename = "ADX_high")]
    pub adx_high: f64,
    #[serde(rename = "ADX_low")]
    pub adx_low: f64,

    #[serde(default)]
    pub warmup: WarmupPolicy,

    /// Per-candle trend logging.
    #[serde(default = "default_debug")]
    pub debug: bool,
}

fn default_debug() -> bool {
    true
}

impl RsiBullBearAdxSettings {
    /// Rejects settings the decision rules cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (field, period) in [
            ("SMA_short", self.sma_short),
            ("SMA_long", self.sma_long),
            ("BULL_RSI_period", self.bull_rsi_period),
            ("BEAR_RSI_period", self.bear_rsi_period),
            ("ADX_period", self.adx_period),
        ] {
            if period == 0 {
                return Err(Error::InvalidPeriod { field });
            }
        }

        for (field, value) in [
            ("BULL_RSI_high", self.bull_rsi_high),
            ("BULL_RSI_low", self.bull_rsi_low),
            ("BEAR_RSI_high", self.bear_rsi_high),
            ("BEAR_RSI_low", self.bear_rsi_low),
            ("ADX_high", self.adx_high),
            ("ADX_low", self.adx_low),
        ] {
            if !value.is_finite() {
                return Err(Error::NonFinite { field, value });
            }
        }

        for (low_field, low, high_field, high) in [
            ("BULL_RSI_low", self.bull_rsi_low, "BULL_RSI_high", self.bull_rsi_high),
            ("BEAR_RSI_low", self.bear_rsi_low, "BEAR_RSI_high", self.bear_rsi_high),
            ("ADX_low", self.adx_low, "ADX_high", self.adx_high),
        ] {
            if low >= high {
                return Err(Error::InvertedThresholds { low_field, high_field, low, high });
            }
        }

        Ok(())
    }
}
