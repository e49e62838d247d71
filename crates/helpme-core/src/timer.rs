//! One-shot deadlines owned by screen state
//!
//! A `Deadline` lives inside the state of the screen that scheduled it.
//! Leaving the screen drops that state and the deadline with it, so a timer
//! can never fire against a screen that is no longer shown. The front end
//! polls the router on every tick.

use std::time::{Duration, Instant};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    due: Instant,
}

impl Deadline {
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self { due: now + delay }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

/// Delays and thresholds for the simulated parts of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Waiting screen auto-connects after this
    pub connect_delay: Duration,
    /// "Partner typing" before a canned reply lands
    pub reply_delay: Duration,
    /// Pause between the triggering reply and the level-up overlay
    pub level_up_delay: Duration,
    /// Transcript length that must be exceeded before trust can grow
    pub level_up_message_threshold: usize,
    /// Countdown shown on the waiting screen
    pub estimated_wait: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_secs(5),
            reply_delay: Duration::from_secs(2),
            level_up_delay: Duration::from_secs(2),
            level_up_message_threshold: 5,
            estimated_wait: Duration::from_secs(180),
        }
    }
}

impl From<&Config> for Timings {
    fn from(config: &Config) -> Self {
        Self {
            connect_delay: Duration::from_millis(config.connect_delay_ms),
            reply_delay: Duration::from_millis(config.reply_delay_ms),
            level_up_delay: Duration::from_millis(config.level_up_delay_ms),
            level_up_message_threshold: config.level_up_message_threshold,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_fires_at_due_time() {
        let start = Instant::now();
        let deadline = Deadline::after(start, Duration::from_secs(5));
        assert!(!deadline.is_due(start));
        assert!(!deadline.is_due(start + Duration::from_millis(4_999)));
        assert!(deadline.is_due(start + Duration::from_secs(5)));
        assert!(deadline.is_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_remaining_saturates() {
        let start = Instant::now();
        let deadline = Deadline::after(start, Duration::from_secs(2));
        assert_eq!(deadline.remaining(start), Duration::from_secs(2));
        assert_eq!(deadline.remaining(start + Duration::from_secs(3)), Duration::ZERO);
    }

    #[test]
    fn test_timings_from_config() {
        let config = Config {
            connect_delay_ms: 100,
            reply_delay_ms: 20,
            level_up_delay_ms: 30,
            level_up_message_threshold: 1,
            ..Config::default()
        };
        let timings = Timings::from(&config);
        assert_eq!(timings.connect_delay, Duration::from_millis(100));
        assert_eq!(timings.reply_delay, Duration::from_millis(20));
        assert_eq!(timings.level_up_delay, Duration::from_millis(30));
        assert_eq!(timings.level_up_message_threshold, 1);
        assert_eq!(timings.estimated_wait, Duration::from_secs(180));
    }

    #[test]
    fn test_default_config_matches_default_timings() {
        assert_eq!(Timings::from(&Config::default()), Timings::default());
    }
}
