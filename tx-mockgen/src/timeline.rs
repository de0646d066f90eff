use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::error::GenError;

/// Lookback used when none is configured, unless the count asks for a longer window.
pub const MIN_LOOKBACK_DAYS: u32 = 365;

/// Upper bound on the derived lookback, so a large count can't push the window off the calendar.
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// How transaction timestamps are laid out across the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Uniform instants anywhere in the window, sorted ascending.
    #[default]
    SampledSorted,
    /// Start at the beginning of the window and step forward 0-3 days plus 0-23 hours at a
    /// time, never passing the end of the window.
    RandomWalk,
}

/// Inclusive span that generated timestamps fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    /// The window ends on the last second of `anchor` and reaches back `lookback_days`.
    ///
    /// # Errors
    /// Errors when the start of the window falls outside the representable date range
    pub fn before(anchor: NaiveDate, lookback_days: u32) -> Result<Self, GenError> {
        let end = anchor.and_hms_opt(23, 59, 59).ok_or(GenError::InvalidAnchor)?;
        let start = end
            .checked_sub_signed(Duration::days(i64::from(lookback_days)))
            .ok_or(GenError::InvalidAnchor)?;
        Ok(Window { start, end })
    }

    #[must_use]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// The default lookback for `count` transactions: a year, or two days per transaction if that
/// is longer, capped at [`MAX_LOOKBACK_DAYS`].
#[must_use]
pub fn default_lookback_days(count: usize) -> u32 {
    let wanted = u32::try_from(count.saturating_mul(2)).unwrap_or(u32::MAX);
    wanted.clamp(MIN_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS)
}

/// Produces `count` non-decreasing timestamps inside `window`.
pub fn sequence(
    count: usize,
    window: &Window,
    policy: TimestampPolicy,
    rng: &mut impl Rng,
) -> Vec<NaiveDateTime> {
    match policy {
        TimestampPolicy::SampledSorted => sampled_sorted(count, window, rng),
        TimestampPolicy::RandomWalk => random_walk(count, window, rng),
    }
}

fn sampled_sorted(count: usize, window: &Window, rng: &mut impl Rng) -> Vec<NaiveDateTime> {
    let span = (window.end - window.start).num_seconds();
    let mut timestamps: Vec<NaiveDateTime> = (0..count)
        .map(|_| window.start + Duration::seconds(rng.gen_range(0..=span)))
        .collect();
    timestamps.sort_unstable();
    timestamps
}

fn random_walk(count: usize, window: &Window, rng: &mut impl Rng) -> Vec<NaiveDateTime> {
    let mut current = window.start;
    (0..count)
        .map(|_| {
            let step =
                Duration::days(rng.gen_range(0..=3)) + Duration::hours(rng.gen_range(0..=23));
            current = (current + step).min(window.end);
            current
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[test]
    fn test_window_before_anchor() {
        let window = Window::before(anchor(), 365).unwrap();
        assert_eq!(window.end.to_string(), "2024-12-31 23:59:59");
        assert_eq!(window.start.to_string(), "2024-01-01 23:59:59");
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.end + Duration::seconds(1)));
    }

    #[test]
    fn test_window_out_of_range() {
        let res = Window::before(NaiveDate::MIN, 1);
        assert!(res.is_err());
    }

    #[test]
    fn test_default_lookback() {
        assert_eq!(default_lookback_days(0), MIN_LOOKBACK_DAYS);
        assert_eq!(default_lookback_days(200), MIN_LOOKBACK_DAYS);
        assert_eq!(default_lookback_days(1_000), 2_000);
        assert_eq!(default_lookback_days(20_000), MAX_LOOKBACK_DAYS);
        assert_eq!(default_lookback_days(usize::MAX), MAX_LOOKBACK_DAYS);
    }

    #[test]
    fn test_sampled_sorted_is_ordered_and_bounded() {
        let window = Window::before(anchor(), 30).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let timestamps = sequence(500, &window, TimestampPolicy::SampledSorted, &mut rng);

        assert_eq!(timestamps.len(), 500);
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        assert!(timestamps.iter().all(|&t| window.contains(t)));
        assert!(timestamps.iter().all(|t| t.nanosecond() == 0));
    }

    #[test]
    fn test_random_walk_is_ordered_and_clamped() {
        // 10 days is far too short for 500 steps, so the walk must pile up at the end
        let window = Window::before(anchor(), 10).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let timestamps = sequence(500, &window, TimestampPolicy::RandomWalk, &mut rng);

        assert_eq!(timestamps.len(), 500);
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        assert!(timestamps.iter().all(|&t| window.contains(t)));
        assert_eq!(timestamps.last(), Some(&window.end));
    }

    #[test]
    fn test_random_walk_steps_are_bounded() {
        let window = Window::before(anchor(), 3_650).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let timestamps = sequence(100, &window, TimestampPolicy::RandomWalk, &mut rng);

        let max_step = Duration::days(3) + Duration::hours(23);
        assert!(timestamps[0] - window.start <= max_step);
        assert!(timestamps.windows(2).all(|w| w[1] - w[0] <= max_step));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let window = Window::before(anchor(), 365).unwrap();
        for policy in [TimestampPolicy::SampledSorted, TimestampPolicy::RandomWalk] {
            let first = sequence(50, &window, policy, &mut StdRng::seed_from_u64(11));
            let second = sequence(50, &window, policy, &mut StdRng::seed_from_u64(11));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_sequence() {
        let window = Window::before(anchor(), 365).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        assert!(sequence(0, &window, TimestampPolicy::RandomWalk, &mut rng).is_empty());
    }
}
