//! Polling cadence and retry budget for [`await_completion`].
//!
//! The loop polls at a constant interval; transient transport
//! failures are tolerated up to a bounded number of consecutive
//! occurrences, with the counter resetting on any successful poll.
//!
//! [`await_completion`]: crate::TaskClient::await_completion

use std::time::Duration;

/// Tunable parameters for one polling run.
///
/// The defaults are design placeholders pending confirmation from the
/// backend contract; override per call when the backend's timing is
/// known.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive polls.
    pub poll_interval: Duration,
    /// Total budget for one `await_completion` call. Exhausting it is
    /// recoverable; the task keeps running remotely.
    pub timeout: Duration,
    /// How many consecutive transient transport failures are retried
    /// before the error is surfaced.
    pub max_transient_retries: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(300),
            max_transient_retries: 3,
        }
    }
}

impl PollConfig {
    /// Whether another retry fits in the budget after
    /// `consecutive_failures` transport failures in a row.
    pub fn within_retry_budget(&self, consecutive_failures: u32) -> bool {
        consecutive_failures <= self.max_transient_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_allows_three_retries() {
        let config = PollConfig::default();
        assert!(config.within_retry_budget(1));
        assert!(config.within_retry_budget(2));
        assert!(config.within_retry_budget(3));
        assert!(!config.within_retry_budget(4));
    }

    #[test]
    fn zero_budget_surfaces_the_first_failure() {
        let config = PollConfig {
            max_transient_retries: 0,
            ..Default::default()
        };
        assert!(!config.within_retry_budget(1));
    }
}
