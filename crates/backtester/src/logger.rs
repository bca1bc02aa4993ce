// In crates/backtester/src/logger.rs

use core_types::{Advice, AdviceSink, Evaluation, Regime, Side};
use serde::Serialize;
use tracing::info;

/// Running low/high of one observed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl Default for MinMax {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl MinMax {
    pub fn record(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// `None` until at least one value has been recorded.
    pub fn range(&self) -> Option<(f64, f64)> {
        (self.min <= self.max).then_some((self.min, self.max))
    }
}

/// Everything the logger learned about a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub bear_rsi: MinMax,
    pub bull_rsi: MinMax,
    pub adx: MinMax,
    pub bull_candles: u64,
    pub bear_candles: u64,
    pub long_advices: u64,
    pub short_advices: u64,
    /// Most candles any single advice stayed in force.
    pub longest_trend: u64,
}

/// An observer that records advice and indicator ranges during a replay.
///
/// Attach it as the run's `AdviceSink`; it never influences the advisor.
#[derive(Debug, Default)]
pub struct RunLogger {
    pub advices: Vec<Advice>,
    stats: RunStats,
    last_candle: u64,
}

impl RunLogger {
    /// Creates a new, empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    fn close_trend(&mut self, until: u64) {
        if let Some(previous) = self.advices.last() {
            let span = until.saturating_sub(previous.candle);
            self.stats.longest_trend = self.stats.longest_trend.max(span);
        }
    }
}

impl AdviceSink for RunLogger {
    fn on_advice(&mut self, advice: &Advice) {
        self.close_trend(advice.candle);
        match advice.side {
            Side::Long => self.stats.long_advices += 1,
            Side::Short => self.stats.short_advices += 1,
        }
        self.advices.push(*advice);
    }

    fn on_evaluation(&mut self, evaluation: &Evaluation) {
        self.last_candle = evaluation.candle;
        match evaluation.regime {
            Regime::Bear => {
                self.stats.bear_candles += 1;
                self.stats.bear_rsi.record(evaluation.rsi);
            }
            Regime::Bull => {
                self.stats.bull_candles += 1;
                self.stats.bull_rsi.record(evaluation.rsi);
            }
        }
        self.stats.adx.record(evaluation.adx);
    }

    fn on_finish(&mut self) {
        // The last advice stays in force through the final candle.
        self.close_trend(self.last_candle + 1);

        let fmt = |m: &MinMax| match m.range() {
            Some((min, max)) => format!("{min} / {max}"),
            None => "n/a".to_string(),
        };
        info!("BEAR RSI low/high: {}", fmt(&self.stats.bear_rsi));
        info!("BULL RSI low/high: {}", fmt(&self.stats.bull_rsi));
        info!("ADX min/max: {}", fmt(&self.stats.adx));
        info!(
            longs = self.stats.long_advices,
            shorts = self.stats.short_advices,
            longest_trend = self.stats.longest_trend,
            "Advice summary."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Thresholds;

    fn evaluation(candle: u64, regime: Regime, rsi: f64, adx: f64) -> Evaluation {
        Evaluation {
            candle,
            regime,
            rsi,
            adx,
            thresholds: Thresholds { high: 80.0, low: 20.0 },
            request: None,
        }
    }

    #[test]
    fn min_max_starts_empty() {
        let mut range = MinMax::default();
        assert_eq!(range.range(), None);
        range.record(12.5);
        assert_eq!(range.range(), Some((12.5, 12.5)));
    }

    #[test]
    fn tracks_ranges_per_regime() {
        let mut logger = RunLogger::new();
        logger.on_evaluation(&evaluation(1, Regime::Bear, 40.0, 10.0));
        logger.on_evaluation(&evaluation(2, Regime::Bear, 70.0, 30.0));
        logger.on_evaluation(&evaluation(3, Regime::Bull, 55.0, 20.0));

        let stats = logger.stats();
        assert_eq!(stats.bear_rsi.range(), Some((40.0, 70.0)));
        assert_eq!(stats.bull_rsi.range(), Some((55.0, 55.0)));
        assert_eq!(stats.adx.range(), Some((10.0, 30.0)));
        assert_eq!((stats.bear_candles, stats.bull_candles), (2, 1));
    }

    #[test]
    fn longest_trend_includes_the_open_one() {
        let mut logger = RunLogger::new();
        for candle in 1..=10 {
            logger.on_evaluation(&evaluation(candle, Regime::Bull, 50.0, 50.0));
        }
        logger.on_advice(&Advice { side: Side::Long, candle: 2 });
        logger.on_advice(&Advice { side: Side::Short, candle: 5 });
        logger.on_finish();

        let stats = logger.stats();
        assert_eq!((stats.long_advices, stats.short_advices), (1, 1));
        // Short from candle 5 through candle 10.
        assert_eq!(stats.longest_trend, 6);
        assert_eq!(logger.advices.len(), 2);
    }
}
