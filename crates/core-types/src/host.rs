// In crates/core-types/src/host.rs

use crate::error::Result;
use crate::types::{Advice, Evaluation, IndicatorSnapshot};

/// The host-side source of computed indicator values.
///
/// Yields one snapshot per closed candle, in chronological order, and
/// `Ok(None)` once the series is exhausted.
pub trait IndicatorProvider {
    fn next_snapshot(&mut self) -> Result<Option<IndicatorSnapshot>>;
}

/// The host-side receiver of advice.
///
/// Only `on_advice` is required. The other hooks let observers such as run
/// statistics ride along without touching the decision logic.
pub trait AdviceSink {
    fn on_advice(&mut self, advice: &Advice);

    fn on_evaluation(&mut self, _evaluation: &Evaluation) {}

    fn on_finish(&mut self) {}
}

/// Collecting advice into a vector is all most callers need.
impl AdviceSink for Vec<Advice> {
    fn on_advice(&mut self, advice: &Advice) {
        self.push(*advice);
    }
}
