use std::time::Duration;

/// A repeating timer driven by externally supplied elapsed time.
///
/// The timer keeps the remainder between calls, so feeding it uneven frame deltas
/// still fires at the configured cadence on average. Intervals missed during one long
/// step are not replayed: a single call fires at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTimer {
    interval: Duration,
    elapsed: Duration,
}

impl DropTimer {
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Creates a timer that fires every `interval`, with no time accumulated yet.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next fire.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Accumulates `elapsed` and returns `true` if the timer fired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed < self.interval {
            return false;
        }
        let remainder = self.elapsed.as_nanos() % self.interval.as_nanos();
        // remainder < interval, which came from a `Duration`
        self.elapsed = Duration::from_nanos(u64::try_from(remainder).unwrap_or(u64::MAX));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = DropTimer::new(ms(100));
        assert!(!timer.advance(ms(99)));
        assert_eq!(timer.remaining(), ms(1));
        assert!(timer.advance(ms(1)));
        assert_eq!(timer.remaining(), ms(100));
    }

    #[test]
    fn test_keeps_remainder_across_calls() {
        let mut timer = DropTimer::new(ms(100));
        let fired = (0..10).filter(|_| timer.advance(ms(35))).count();
        assert_eq!(fired, 3);
        assert_eq!(timer.remaining(), ms(50));
    }

    #[test]
    fn test_large_step_fires_once() {
        let mut timer = DropTimer::new(ms(100));
        assert!(timer.advance(ms(1050)));
        assert_eq!(timer.remaining(), ms(50));
        assert!(!timer.advance(ms(49)));
        assert!(timer.advance(ms(1)));

        assert!(timer.advance(Duration::from_secs(3600)));
        assert_eq!(timer.remaining(), ms(100));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut timer = DropTimer::new(Duration::ZERO);
        assert_eq!(timer.interval(), ms(1));
        assert!(timer.advance(ms(3)));
        assert_eq!(timer.remaining(), ms(1));
    }
}
