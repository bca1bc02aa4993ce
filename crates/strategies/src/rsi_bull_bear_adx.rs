// In crates/strategies/src/rsi_bull_bear_adx.rs

use crate::error::Result;
use crate::trend::TrendState;
use crate::types::{RsiBullBearAdxSettings, WarmupPolicy};
use crate::Strategy;
use core_types::{Advice, Evaluation, IndicatorSnapshot, Regime, Side, Thresholds};
use tracing::{debug, info, warn};

/// Added to the bear RSI ceiling when ADX reports a strong trend.
const BEAR_STRONG_TREND_BOOST: f64 = 15.0;
/// Added to the bull RSI ceiling when ADX reports a strong trend.
const BULL_STRONG_TREND_BOOST: f64 = 5.0;
/// Taken off the RSI floor, in either regime, when ADX reports a weak trend.
const WEAK_TREND_RELIEF: f64 = 5.0;

/// RSI Bull and Bear + ADX.
///
/// Uses a different RSI band depending on the longer moving-average trend and
/// widens that band when ADX says the trend is unusually strong or weak.
/// Advice is only produced when the requested side differs from the trend the
/// advisor is already in.
#[derive(Debug)]
pub struct RsiBullBearAdx {
    /// The configuration for this advisor instance.
    settings: RsiBullBearAdxSettings,
    /// The trend built up by previous requests.
    trend: TrendState,
    /// Set once the long moving average has a full window of candles.
    has_required_history: bool,
    warned_insufficient_history: bool,
    last_evaluation: Option<Evaluation>,
}

impl RsiBullBearAdx {
    /// Validates the settings and creates an advisor with no trend.
    pub fn new(settings: RsiBullBearAdxSettings) -> Result<Self> {
        settings.validate()?;
        info!(
            sma_short = settings.sma_short,
            sma_long = settings.sma_long,
            warmup = ?settings.warmup,
            "RSI Bull and Bear + ADX advisor initialised."
        );

        Ok(Self {
            settings,
            trend: TrendState::default(),
            has_required_history: false,
            warned_insufficient_history: false,
            last_evaluation: None,
        })
    }

    pub fn settings(&self) -> &RsiBullBearAdxSettings {
        &self.settings
    }

    pub fn trend(&self) -> TrendState {
        self.trend
    }

    /// Whether the advisor has seen enough candles to trust the long trend.
    pub fn is_ready(&self) -> bool {
        self.has_required_history
    }

    /// BEAR when the fast average sits below the slow one, BULL otherwise.
    /// A tie counts as BULL.
    pub fn classify(snapshot: &IndicatorSnapshot) -> Regime {
        if snapshot.ma_fast < snapshot.ma_slow {
            Regime::Bear
        } else {
            Regime::Bull
        }
    }

    /// The RSI band for a regime after the ADX modifier.
    ///
    /// At most one bound moves: a strong trend lifts the ceiling, otherwise a
    /// weak trend lowers the floor.
    pub fn thresholds(&self, regime: Regime, adx: f64) -> Thresholds {
        let (mut high, mut low, boost) = match regime {
            Regime::Bear => (
                self.settings.bear_rsi_high,
                self.settings.bear_rsi_low,
                BEAR_STRONG_TREND_BOOST,
            ),
            Regime::Bull => (
                self.settings.bull_rsi_high,
                self.settings.bull_rsi_low,
                BULL_STRONG_TREND_BOOST,
            ),
        };

        if adx > self.settings.adx_high {
            high += boost;
        } else if adx < self.settings.adx_low {
            low -= WEAK_TREND_RELIEF;
        }

        Thresholds { high, low }
    }

    /// Runs the decision rules on one snapshot without touching any state.
    pub fn evaluate(&self, candle: u64, snapshot: &IndicatorSnapshot) -> Evaluation {
        let regime = Self::classify(snapshot);
        let thresholds = self.thresholds(regime, snapshot.adx);
        let rsi = match regime {
            Regime::Bear => snapshot.bear_rsi,
            Regime::Bull => snapshot.bull_rsi,
        };

        let request = if rsi > thresholds.high {
            Some(Side::Short)
        } else if rsi < thresholds.low {
            Some(Side::Long)
        } else {
            None
        };

        Evaluation {
            candle,
            regime,
            rsi,
            adx: snapshot.adx,
            thresholds,
            request,
        }
    }

    /// Tracks whether the long moving average has a full window yet.
    fn track_history(&mut self, age: u64) {
        if age < u64::from(self.settings.sma_long) {
            if !self.warned_insufficient_history {
                self.warned_insufficient_history = true;
                warn!(
                    age,
                    required = self.settings.sma_long,
                    "Not enough historical data to see the longer trend yet."
                );
            }
        } else if !self.has_required_history {
            self.has_required_history = true;
            info!(age, "Enough historical data to see the longer trend.");
        }
    }

    /// Moves the trend towards `side`, producing advice only on a change.
    fn follow(&mut self, side: Side, candle: u64) -> Option<Advice> {
        let changed = self.trend.advance(side);

        if self.settings.debug {
            if changed {
                match side {
                    Side::Long => info!(candle, "Going long"),
                    Side::Short => info!(candle, "Going short"),
                }
            }
            match side {
                Side::Long => info!("Long since {} candle(s)", self.trend.duration),
                Side::Short => info!("Short since {} candle(s)", self.trend.duration),
            }
        }

        changed.then_some(Advice { side, candle })
    }
}

impl Strategy for RsiBullBearAdx {
    fn name(&self) -> &'static str {
        "RSI Bull and Bear + ADX"
    }

    fn required_history(&self) -> u64 {
        u64::from(self.settings.sma_long)
    }

    fn on_candle(&mut self, age: u64, snapshot: &IndicatorSnapshot) -> Option<Advice> {
        // 1. Warm-up bookkeeping.
        self.track_history(age);

        // 2. Apply the regime rules.
        let evaluation = self.evaluate(age, snapshot);
        self.last_evaluation = Some(evaluation);
        debug!(
            regime = %evaluation.regime,
            rsi = evaluation.rsi,
            adx = evaluation.adx,
            high = evaluation.thresholds.high,
            low = evaluation.thresholds.low,
            "Evaluated candle."
        );

        let side = evaluation.request?;

        // 3. Under an enforced warm-up the request is dropped outright.
        if self.settings.warmup == WarmupPolicy::Enforce && !self.has_required_history {
            debug!(age, %side, "Ignoring request during warm-up.");
            return None;
        }

        // 4. Only act on new trends.
        self.follow(side, age)
    }

    fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }

    fn on_backtest_end(&mut self) {
        info!(
            direction = ?self.trend.direction,
            duration = self.trend.duration,
            ready = self.has_required_history,
            "Advisor finished."
        );
    }
}
