//! Application Configuration
//!
//! Configuration for the progression application layer.

use std::time::Duration;

use crate::domain::value_object::Minutes;

/// Where local play time is read from
///
/// Chosen once at construction; only the statistics source falls back to the
/// internal store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSourceKind {
    /// Our own persisted store
    #[default]
    Internal,
    /// Statistics plugin total play time, internal store when it has no handler
    Statistics,
    /// Dedicated time-tracking plugin
    TimeTracker,
}

impl TimeSourceKind {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Statistics => "statistics",
            Self::TimeTracker => "time_tracker",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "internal" => Some(Self::Internal),
            "statistics" | "stats" => Some(Self::Statistics),
            "time_tracker" | "ontime" => Some(Self::TimeTracker),
            _ => None,
        }
    }
}

/// Progression application configuration
#[derive(Debug, Clone)]
pub struct RankupConfig {
    /// Time between accounting ticks; also the minutes credited per tick
    pub interval: Duration,
    /// Time between autosaves of the local stores
    pub save_interval: Duration,
    pub time_source: TimeSourceKind,
}

impl Default for RankupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5 * 60),    // 5 minutes
            save_interval: Duration::from_secs(30), // 30 seconds
            time_source: TimeSourceKind::Internal,
        }
    }
}

impl RankupConfig {
    /// Config with a custom accounting interval
    pub fn with_interval_minutes(minutes: u32) -> Self {
        Self {
            interval: Duration::from_secs(u64::from(minutes.max(1)) * 60),
            ..Default::default()
        }
    }

    /// Minutes credited to each online player per accounting tick
    pub fn interval_minutes(&self) -> Minutes {
        let minutes = (self.interval.as_secs() / 60).max(1);
        Minutes::new(u32::try_from(minutes).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RankupConfig::default();

        assert_eq!(config.interval_minutes(), Minutes::new(5));
        assert_eq!(config.save_interval, Duration::from_secs(30));
        assert_eq!(config.time_source, TimeSourceKind::Internal);
    }

    #[test]
    fn test_interval_is_at_least_one_minute() {
        assert_eq!(RankupConfig::with_interval_minutes(0).interval_minutes(), Minutes::new(1));
        assert_eq!(RankupConfig::with_interval_minutes(10).interval_minutes(), Minutes::new(10));
    }

    #[test]
    fn test_time_source_codes() {
        for kind in [
            TimeSourceKind::Internal,
            TimeSourceKind::Statistics,
            TimeSourceKind::TimeTracker,
        ] {
            assert_eq!(TimeSourceKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TimeSourceKind::from_code("OnTime"), Some(TimeSourceKind::TimeTracker));
        assert_eq!(TimeSourceKind::from_code("unknown"), None);
    }
}
