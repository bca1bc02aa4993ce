// In crates/strategies/src/lib.rs

use core_types::{Advice, Evaluation, IndicatorSnapshot};
pub mod error;
pub mod factory;
pub mod rsi_bull_bear_adx;
pub mod trend;
pub mod types;

pub use error::{Error, Result};

/// The universal interface for an advice-producing strategy.
///
/// The host calls `on_candle` once per closed candle, in order, with the
/// indicator values it computed for that candle. A strategy is stateful and
/// owned by a single caller; independent instances may run side by side.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Candles the host should have fed before the strategy's longest
    /// indicator window is full.
    fn required_history(&self) -> u64;

    /// Evaluates one candle. `age` is the host's 1-based candle counter.
    fn on_candle(&mut self, age: u64, snapshot: &IndicatorSnapshot) -> Option<Advice>;

    /// The evaluation made on the most recent candle, for observers.
    fn last_evaluation(&self) -> Option<&Evaluation>;

    /// Called once after the final candle of a run.
    fn on_backtest_end(&mut self) {}
}
