pub mod logger;
pub mod provider;

use std::time::{Duration, Instant};

use core_types::{AdviceSink, IndicatorProvider};
use serde::Serialize;
use strategies::Strategy;
use tracing::{debug, info};

pub use logger::{MinMax, RunLogger, RunStats};
pub use provider::{JsonLinesProvider, SnapshotSeries};

/// What a finished replay reports back.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub strategy: &'static str,
    pub candles: u64,
    pub advices: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Plays a recorded indicator series through a single strategy, standing in
/// for the host's candle loop.
pub struct Backtester {
    /// A label for log lines, usually the trading pair.
    pub label: String,
    /// The strategy instance under test. Owned exclusively by this run.
    pub strategy: Box<dyn Strategy + Send>,
}

impl Backtester {
    pub fn new(label: impl Into<String>, strategy: Box<dyn Strategy + Send>) -> Self {
        Self {
            label: label.into(),
            strategy,
        }
    }

    /// Feeds every snapshot the provider yields to the strategy, in order,
    /// forwarding evaluations and advice to `sink`.
    pub fn run(
        &mut self,
        provider: &mut dyn IndicatorProvider,
        sink: &mut dyn AdviceSink,
    ) -> anyhow::Result<RunSummary> {
        let start_time = Instant::now();
        let name = self.strategy.name();
        info!(label = %self.label, strategy = name, "Starting replay.");

        let mut age: u64 = 0;
        let mut advices: u64 = 0;

        while let Some(snapshot) = provider.next_snapshot()? {
            age += 1;

            let advice = self.strategy.on_candle(age, &snapshot);
            if let Some(evaluation) = self.strategy.last_evaluation() {
                sink.on_evaluation(evaluation);
            }
            if let Some(advice) = advice {
                debug!(label = %self.label, candle = advice.candle, side = %advice.side, "Advice emitted.");
                sink.on_advice(&advice);
                advices += 1;
            }
        }

        if age < self.strategy.required_history() {
            tracing::warn!(
                label = %self.label,
                candles = age,
                required = self.strategy.required_history(),
                "Replay ended before the strategy had its full history."
            );
        }

        self.strategy.on_backtest_end();
        sink.on_finish();

        let elapsed = start_time.elapsed();
        info!(label = %self.label, "====================================");
        info!(label = %self.label, "Finished in {}", format_elapsed(elapsed));
        info!(label = %self.label, "====================================");

        Ok(RunSummary {
            strategy: name,
            candles: age,
            advices,
            elapsed,
        })
    }
}

/// Seconds below one minute, minutes above, two decimals either way.
fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    let minutes = seconds / 60.0;
    if minutes < 1.0 {
        format!("{seconds:.2} seconds")
    } else {
        format!("{minutes:.2} minutes")
    }
}
