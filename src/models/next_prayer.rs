use chrono::{NaiveDateTime, NaiveTime};

use crate::models::PrayerType;

/// The upcoming prayer relative to some moment. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: PrayerType,
    pub time: NaiveTime,
    pub display_name: &'static str,
    /// True when the prayer falls on the following calendar day.
    pub is_tomorrow: bool,
    pub at: NaiveDateTime,
}

/// Remaining time in whole units, floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_secs(secs: i64) -> Self {
        let secs = secs.max(0);
        Self {
            hours: secs / 3600,
            minutes: (secs % 3600) / 60,
            seconds: secs % 60,
        }
    }

    /// Time from `now` until `target`; zero if `target` already passed.
    pub fn between(now: NaiveDateTime, target: NaiveDateTime) -> Self {
        Self::from_secs((target - now).num_seconds())
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
