// In crates/strategies/src/trend.rs

use core_types::{Side, TrendDirection};

/// The advisor's running view of the current trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrendState {
    pub direction: TrendDirection,
    /// Number of evaluations that requested the current direction.
    pub duration: u64,
}

impl TrendState {
    /// Applies a requested side. Returns `true` when it starts a new trend,
    /// which is the only time the caller should emit advice.
    pub fn advance(&mut self, side: Side) -> bool {
        let direction = TrendDirection::for_side(side);
        let changed = self.direction != direction;
        if changed {
            *self = TrendState { direction, duration: 0 };
        }
        self.duration += 1;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_direction() {
        let trend = TrendState::default();
        assert_eq!(trend.direction, TrendDirection::None);
        assert_eq!(trend.duration, 0);
    }

    #[test]
    fn first_request_opens_a_trend() {
        let mut trend = TrendState::default();
        assert!(trend.advance(Side::Long));
        assert_eq!(trend, TrendState { direction: TrendDirection::Up, duration: 1 });
    }

    #[test]
    fn repeated_request_extends_the_trend() {
        let mut trend = TrendState::default();
        trend.advance(Side::Short);
        assert!(!trend.advance(Side::Short));
        assert!(!trend.advance(Side::Short));
        assert_eq!(trend, TrendState { direction: TrendDirection::Down, duration: 3 });
    }

    #[test]
    fn reversal_resets_duration() {
        let mut trend = TrendState::default();
        trend.advance(Side::Long);
        trend.advance(Side::Long);
        assert!(trend.advance(Side::Short));
        assert_eq!(trend, TrendState { direction: TrendDirection::Down, duration: 1 });
    }
}
