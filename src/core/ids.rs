use super::Clock;

/// Issues transaction ids derived from the wall clock in milliseconds.
///
/// Two additions inside the same millisecond (or a clock that steps backwards)
/// would collide on a raw timestamp, so each id is at least one greater than
/// the previous one.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts after the highest id already present in loaded history.
    pub fn seeded(last: Option<i64>) -> Self {
        Self { last }
    }

    pub fn next(&mut self, clock: &dyn Clock) -> i64 {
        let now = clock.now().timestamp_millis();
        let id = match self.last {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last = Some(id);
        id
    }

    pub fn last(&self) -> Option<i64> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;

    #[test]
    fn uses_timestamp_when_clock_advances() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(&FixedClock::from_millis(1_000)), 1_000);
        assert_eq!(ids.next(&FixedClock::from_millis(2_000)), 2_000);
    }

    #[test]
    fn stays_unique_within_the_same_millisecond() {
        let clock = FixedClock::from_millis(5_000);
        let mut ids = IdGenerator::new();
        let first = ids.next(&clock);
        let second = ids.next(&clock);
        let third = ids.next(&clock);
        assert_eq!((first, second, third), (5_000, 5_001, 5_002));
    }

    #[test]
    fn seeded_generator_never_reuses_loaded_ids() {
        let mut ids = IdGenerator::seeded(Some(9_000));
        assert_eq!(ids.next(&FixedClock::from_millis(100)), 9_001);
    }
}
