//! Scheduler configuration.
//!
//! # Environment Variables
//!
//! - `PLANNER_DAY_START`: first bookable hour (default 9)
//! - `PLANNER_DAY_END`: end of the work window, exclusive (default 18)
//! - `PLANNER_FALLBACK_HORIZON`: calendar days searched when a day is full (default 5)
//! - `PLANNER_READ_FAILURE`: `available` or `unavailable`
//! - `PLANNER_MEETING_CONFLICTS`: `trust` or `reject`

use std::str::FromStr;

use tracing::warn;

use crate::meeting::MeetingConflictPolicy;
use crate::policy::ReadFailurePolicy;

/// Environment variable for the first bookable hour.
pub const DAY_START_ENV: &str = "PLANNER_DAY_START";

/// Environment variable for the end of the work window.
pub const DAY_END_ENV: &str = "PLANNER_DAY_END";

/// Environment variable for the next-business-day search horizon.
pub const FALLBACK_HORIZON_ENV: &str = "PLANNER_FALLBACK_HORIZON";

/// Environment variable for the read-failure policy.
pub const READ_FAILURE_ENV: &str = "PLANNER_READ_FAILURE";

/// Environment variable for the meeting conflict policy.
pub const MEETING_CONFLICTS_ENV: &str = "PLANNER_MEETING_CONFLICTS";

/// Configuration for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// First hour a block may start.
    pub day_start_hour: u8,
    /// Hour by which every block must have ended.
    pub day_end_hour: u8,
    /// Calendar days searched for a later business day when a day is full.
    pub fallback_horizon_days: u32,
    /// What a failed store read means.
    pub read_failure_policy: ReadFailurePolicy,
    /// Whether meetings check existing bookings.
    pub meeting_conflicts: MeetingConflictPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 9,
            day_end_hour: 18,
            fallback_horizon_days: 5,
            read_failure_policy: ReadFailurePolicy::AssumeAvailable,
            meeting_conflicts: MeetingConflictPolicy::Trust,
        }
    }
}

impl SchedulerConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the config from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the config from an arbitrary key lookup.
    ///
    /// Missing or unparseable values keep their defaults. A window that ends
    /// before it starts, or past midnight, resets both hours.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut config = Self {
            day_start_hour: parse_or(&lookup, DAY_START_ENV, defaults.day_start_hour),
            day_end_hour: parse_or(&lookup, DAY_END_ENV, defaults.day_end_hour),
            fallback_horizon_days: parse_or(
                &lookup,
                FALLBACK_HORIZON_ENV,
                defaults.fallback_horizon_days,
            ),
            read_failure_policy: parse_or(&lookup, READ_FAILURE_ENV, defaults.read_failure_policy),
            meeting_conflicts: parse_or(&lookup, MEETING_CONFLICTS_ENV, defaults.meeting_conflicts),
        };

        if !config.has_valid_window() {
            warn!(
                start = config.day_start_hour,
                end = config.day_end_hour,
                "invalid work window, using defaults"
            );
            config.day_start_hour = defaults.day_start_hour;
            config.day_end_hour = defaults.day_end_hour;
        }

        config
    }

    /// Returns true if the work window is non-empty and ends by midnight.
    pub fn has_valid_window(&self) -> bool {
        self.day_start_hour < self.day_end_hour && self.day_end_hour <= 24
    }

    /// Length of the work window in hours.
    pub fn window_hours(&self) -> u8 {
        self.day_end_hour.saturating_sub(self.day_start_hour)
    }

    /// Sets the work window.
    pub fn with_work_window(mut self, start_hour: u8, end_hour: u8) -> Self {
        self.day_start_hour = start_hour;
        self.day_end_hour = end_hour;
        self
    }

    /// Sets the fallback search horizon.
    pub fn with_fallback_horizon(mut self, days: u32) -> Self {
        self.fallback_horizon_days = days;
        self
    }

    /// Sets the read-failure policy.
    pub fn with_read_failure_policy(mut self, policy: ReadFailurePolicy) -> Self {
        self.read_failure_policy = policy;
        self
    }

    /// Sets the meeting conflict policy.
    pub fn with_meeting_conflicts(mut self, policy: MeetingConflictPolicy) -> Self {
        self.meeting_conflicts = policy;
        self
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable setting");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();

        assert_eq!(config.day_start_hour, 9);
        assert_eq!(config.day_end_hour, 18);
        assert_eq!(config.fallback_horizon_days, 5);
        assert_eq!(config.read_failure_policy, ReadFailurePolicy::AssumeAvailable);
        assert_eq!(config.meeting_conflicts, MeetingConflictPolicy::Trust);
        assert_eq!(config.window_hours(), 9);
    }

    #[test]
    fn test_config_builder() {
        let config = SchedulerConfig::new()
            .with_work_window(8, 17)
            .with_fallback_horizon(10)
            .with_read_failure_policy(ReadFailurePolicy::AssumeUnavailable)
            .with_meeting_conflicts(MeetingConflictPolicy::Reject);

        assert_eq!(config.day_start_hour, 8);
        assert_eq!(config.day_end_hour, 17);
        assert_eq!(config.fallback_horizon_days, 10);
        assert_eq!(config.read_failure_policy, ReadFailurePolicy::AssumeUnavailable);
        assert_eq!(config.meeting_conflicts, MeetingConflictPolicy::Reject);
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = SchedulerConfig::from_lookup(lookup(&[
            (DAY_START_ENV, "8"),
            (DAY_END_ENV, "16"),
            (FALLBACK_HORIZON_ENV, "7"),
            (READ_FAILURE_ENV, "unavailable"),
            (MEETING_CONFLICTS_ENV, "reject"),
        ]));

        assert_eq!(config.day_start_hour, 8);
        assert_eq!(config.day_end_hour, 16);
        assert_eq!(config.fallback_horizon_days, 7);
        assert_eq!(config.read_failure_policy, ReadFailurePolicy::AssumeUnavailable);
        assert_eq!(config.meeting_conflicts, MeetingConflictPolicy::Reject);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        assert_eq!(SchedulerConfig::from_lookup(|_| None), SchedulerConfig::default());
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = SchedulerConfig::from_lookup(lookup(&[
            (DAY_START_ENV, "early"),
            (MEETING_CONFLICTS_ENV, "sometimes"),
        ]));
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn test_from_lookup_resets_inverted_window() {
        let config = SchedulerConfig::from_lookup(lookup(&[
            (DAY_START_ENV, "17"),
            (DAY_END_ENV, "9"),
        ]));
        assert_eq!(config.day_start_hour, 9);
        assert_eq!(config.day_end_hour, 18);
    }
}
