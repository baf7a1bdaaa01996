//! Timing budget for code-action lookups.

use std::time::Duration;

use crate::defaults::{DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY};

/// How long the bridge waits for the host's analysis engine to produce code
/// actions.
///
/// The worst-case latency of a lookup is
/// `settle_delay + (attempts - 1) * interval`: the pause only separates two
/// queries, so none follows the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay between staging the buffer and the first query.
    pub settle_delay: Duration,
    /// Maximum number of queries.
    pub attempts: u32,
    /// Delay between two consecutive empty queries.
    pub interval: Duration,
}

impl PollSettings {
    /// Builds settings from explicit values.
    #[must_use]
    pub const fn new(settle_delay: Duration, attempts: u32, interval: Duration) -> Self {
        Self {
            settle_delay,
            attempts,
            interval,
        }
    }

    /// Upper bound on the time spent waiting, excluding the queries
    /// themselves.
    #[must_use]
    pub const fn worst_case(&self) -> Duration {
        let pauses = self.attempts.saturating_sub(1);
        self.settle_delay.saturating_add(self.interval.saturating_mul(pauses))
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_SETTLE_DELAY,
            DEFAULT_POLL_ATTEMPTS,
            DEFAULT_POLL_INTERVAL,
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_worst_case_is_four_point_nine_seconds() {
        assert_eq!(
            PollSettings::default().worst_case(),
            Duration::from_millis(4900)
        );
    }

    #[rstest]
    #[case::single_query(1, 0)]
    #[case::two_queries(2, 20)]
    #[case::five_queries(5, 80)]
    fn worst_case_counts_pauses_between_queries(
        #[case] attempts: u32,
        #[case] waited_ms: u64,
    ) {
        let settings =
            PollSettings::new(Duration::from_millis(5), attempts, Duration::from_millis(20));
        assert_eq!(settings.worst_case(), Duration::from_millis(5 + waited_ms));
    }

    #[test]
    fn zero_attempts_never_underflows() {
        let settings =
            PollSettings::new(Duration::from_millis(5), 0, Duration::from_millis(20));
        assert_eq!(settings.worst_case(), Duration::from_millis(5));
    }
}
